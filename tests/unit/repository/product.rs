use storefront::adapter::repository::{AbsProductRepo, ProductInMemRepo};
use storefront::model::ProductModel;

use super::super::ut_setup_dstore;

fn ut_catalog() -> Vec<ProductModel> {
    [
        ("motichoor-laddu", 180u32, 5u32, true, true),
        ("kaju-katli", 420, 5, true, false),
        ("soan-papdi", 90, 18, false, false),
    ]
    .into_iter()
    .map(|d| ProductModel {
        id: d.0.to_string(),
        name: d.0.replace('-', " "),
        price_rupees: d.1,
        weight_grams: 250,
        gst_rate_pct: d.2,
        available: d.3,
        free_delivery: d.4,
    })
    .collect()
}

#[tokio::test]
async fn save_then_fetch_subset() {
    let ds = ut_setup_dstore(50);
    let repo = ProductInMemRepo::new(ds).await.unwrap();
    repo.save(ut_catalog()).await.unwrap();
    let ids = [
        "kaju-katli".to_string(),
        "no-such-sweet".to_string(),
        "soan-papdi".to_string(),
    ];
    let mut found = repo.fetch_many(&ids).await.unwrap();
    found.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].id.as_str(), "kaju-katli");
    assert_eq!(found[0].price_rupees, 420);
    assert!(found[0].available);
    assert!(!found[0].free_delivery);
    assert_eq!(found[1].id.as_str(), "soan-papdi");
    assert!(!found[1].available);
    assert_eq!(found[1].gst_rate_pct, 18);
}

#[tokio::test]
async fn save_overwrites_existing() {
    let ds = ut_setup_dstore(50);
    let repo = ProductInMemRepo::new(ds).await.unwrap();
    repo.save(ut_catalog()).await.unwrap();
    let mut edited = ut_catalog();
    edited[0].price_rupees = 200;
    edited[0].available = false;
    repo.save(edited).await.unwrap();
    let found = repo
        .fetch_many(&["motichoor-laddu".to_string()])
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].price_rupees, 200);
    assert!(!found[0].available);
}
