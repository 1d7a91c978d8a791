use cart::{Cart, CartConfig, CartStore, LogNotifier, Product, UpdateProductAmount};
use catalog::{CatalogProduct, InMemoryCatalog};
use common::ProductId;
use criterion::{Criterion, criterion_group, criterion_main};
use storage::InMemoryStorage;

fn seeded_catalog(products: u64) -> InMemoryCatalog {
    let catalog = InMemoryCatalog::new();
    for id in 1..=products {
        catalog.insert(
            CatalogProduct::new(id)
                .with_detail("title", format!("Tênis {id}"))
                .with_detail("price", 99.9),
            u32::MAX,
        );
    }
    catalog
}

fn bench_add_product(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = rt.block_on(async {
        CartStore::open(
            InMemoryStorage::new(),
            seeded_catalog(1),
            LogNotifier,
            CartConfig::default(),
        )
        .await
        .unwrap()
    });

    c.bench_function("cart/add_product_increment", |b| {
        b.iter(|| {
            rt.block_on(async {
                store.add_product(ProductId::new(1)).await;
            });
        });
    });
}

fn bench_update_in_large_cart(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = rt.block_on(async {
        let store = CartStore::open(
            InMemoryStorage::new(),
            seeded_catalog(100),
            LogNotifier,
            CartConfig::default(),
        )
        .await
        .unwrap();
        for id in 1..=100 {
            store.add_product(ProductId::new(id)).await;
        }
        store
    });

    c.bench_function("cart/update_amount_100_products", |b| {
        b.iter(|| {
            rt.block_on(async {
                store
                    .update_product_amount(UpdateProductAmount::new(50, 3))
                    .await;
            });
        });
    });
}

fn bench_snapshot_decode(c: &mut Criterion) {
    let products: Vec<Product> = (1..=100)
        .map(|id| {
            Product::from_catalog(
                CatalogProduct::new(id)
                    .with_detail("title", format!("Tênis {id}"))
                    .with_detail("price", 99.9),
            )
        })
        .collect();
    let json = serde_json::to_string(&products).unwrap();

    c.bench_function("cart/decode_snapshot_100", |b| {
        b.iter(|| {
            let cart: Cart = serde_json::from_str(&json).unwrap();
            criterion::black_box(cart);
        });
    });
}

criterion_group!(
    benches,
    bench_add_product,
    bench_update_in_large_cart,
    bench_snapshot_decode,
);
criterion_main!(benches);
