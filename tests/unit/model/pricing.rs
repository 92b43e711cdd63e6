use storefront::api::web::dto::DeliveryPricingDto;
use storefront::model::{line_gst_total_paise, split_gst_paise, DeliveryPricingModel};

fn ut_default_pricing() -> DeliveryPricingModel {
    // 499 / 299 / 30 / 50, the shop's launch configuration
    DeliveryPricingModel::default()
}

#[test]
fn delivery_charge_ladder_ok() {
    let cfg = ut_default_pricing();
    assert_eq!(cfg.delivery_charge_rupees(350, false), 30);
    assert_eq!(cfg.delivery_charge_rupees(500, false), 0);
    assert_eq!(cfg.delivery_charge_rupees(100, false), 50);
    // boundary instants of both thresholds
    assert_eq!(cfg.delivery_charge_rupees(499, false), 0);
    assert_eq!(cfg.delivery_charge_rupees(498, false), 30);
    assert_eq!(cfg.delivery_charge_rupees(299, false), 30);
    assert_eq!(cfg.delivery_charge_rupees(298, false), 50);
}

#[test]
fn delivery_charge_free_item_overrides() {
    let cfg = ut_default_pricing();
    assert_eq!(cfg.delivery_charge_rupees(1, true), 0);
    assert_eq!(cfg.delivery_charge_rupees(350, true), 0);
    assert_eq!(cfg.delivery_charge_rupees(10_000, true), 0);
}

#[test]
fn delivery_charge_monotonic_non_increasing() {
    let cfg = ut_default_pricing();
    let mut last = u32::MAX;
    for subtotal in 0u64..700 {
        let charge = cfg.delivery_charge_rupees(subtotal, false);
        assert!(charge <= last);
        assert!([0u32, cfg.reduced_delivery_fee, cfg.base_delivery_fee].contains(&charge));
        last = charge;
    }
}

#[test]
fn delivery_charge_in_paise() {
    let cfg = ut_default_pricing();
    assert_eq!(cfg.delivery_charge_paise(350, false), 3000);
    assert_eq!(cfg.delivery_charge_paise(500, false), 0);
}

#[test]
fn gst_split_example_scenario() {
    // two items, price 100 qty 2 (rate 5%) and price 200 qty 1 (rate 18%)
    let gst1 = line_gst_total_paise(100 * 2 * 100, 5);
    assert_eq!(gst1, 1000); // 10 rupees
    let (cgst1, sgst1) = split_gst_paise(gst1);
    assert_eq!((cgst1, sgst1), (500, 500));

    let gst2 = line_gst_total_paise(200 * 100, 18);
    assert_eq!(gst2, 3600); // 36 rupees
    let (cgst2, sgst2) = split_gst_paise(gst2);
    assert_eq!((cgst2, sgst2), (1800, 1800));

    assert_eq!(cgst1 + cgst2, 2300);
    assert_eq!(sgst1 + sgst2, 2300);
}

#[test]
fn gst_split_no_rounding_drift() {
    // odd totals split unevenly yet always sum back exactly
    let cases = [
        (10_100u64, 5u32),
        (333u64, 7u32),
        (1u64, 99u32),
        (12_345u64, 18u32),
        (55_555u64, 12u32),
    ];
    for (base_paise, rate) in cases {
        let total = line_gst_total_paise(base_paise, rate);
        assert_eq!(total, base_paise * (rate as u64) / 100);
        let (cgst, sgst) = split_gst_paise(total);
        assert_eq!(cgst + sgst, total);
        assert!(sgst == cgst || sgst == cgst + 1);
    }
}

#[test]
fn pricing_edit_invariant_rejected() {
    let dto = DeliveryPricingDto {
        free_delivery_threshold: 300,
        reduced_delivery_threshold: 400,
        reduced_delivery_fee: 30,
        base_delivery_fee: 50,
    };
    let result = DeliveryPricingModel::try_from(dto);
    assert!(result.is_err());
}

#[test]
fn pricing_edit_accepted() {
    let dto = DeliveryPricingDto {
        free_delivery_threshold: 600,
        reduced_delivery_threshold: 350,
        reduced_delivery_fee: 25,
        base_delivery_fee: 45,
    };
    let ms = DeliveryPricingModel::try_from(dto).unwrap();
    assert_eq!(ms.free_delivery_threshold, 600);
    assert_eq!(ms.delivery_charge_rupees(360, false), 25);
}

#[test]
fn pricing_edit_equal_thresholds_allowed() {
    let dto = DeliveryPricingDto {
        free_delivery_threshold: 400,
        reduced_delivery_threshold: 400,
        reduced_delivery_fee: 30,
        base_delivery_fee: 50,
    };
    assert!(DeliveryPricingModel::try_from(dto).is_ok());
}
