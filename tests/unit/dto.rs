use serde_json::{json, Value as JsnVal};

use storefront::api::web::dto::{
    CheckoutContactErrorDto, DeliveryPricingDto, OrderCreateReqDto, OrderCreateRespOkDto,
    PaymentVerifyReqDto, TrackOrdersReqDto,
};

#[test]
fn create_order_request_wire_format() {
    let raw = r#"{
        "customer": {
            "name": "Asha Rani",
            "phone": "9876543210",
            "email": "asha.rani@example.com",
            "addressLine": "14-B, Gandhi Road, near the old clock tower",
            "city": "Jaipur",
            "state": "Rajasthan",
            "pincode": "302001"
        },
        "items": [
            {"id": "laddu", "quantity": 2},
            {"id": "kaju-katli", "quantity": 1}
        ]
    }"#;
    let req = serde_json::from_str::<OrderCreateReqDto>(raw).unwrap();
    assert_eq!(req.customer.name.as_str(), "Asha Rani");
    assert_eq!(
        req.customer.address_line.as_str(),
        "14-B, Gandhi Road, near the old clock tower"
    );
    assert_eq!(req.items.len(), 2);
    assert_eq!(req.items[1].quantity, 1);
}

#[test]
fn verify_request_wire_format() {
    let raw = r#"{
        "gatewayOrderId": "order_ut0001",
        "gatewayPaymentId": "pay_ut0001",
        "gatewaySignature": "abcd",
        "internalOrderId": "a3f0019bd2c845e0"
    }"#;
    let req = serde_json::from_str::<PaymentVerifyReqDto>(raw).unwrap();
    assert_eq!(req.gateway_order_id.as_str(), "order_ut0001");
    assert_eq!(req.gateway_payment_id.as_str(), "pay_ut0001");
}

#[test]
fn create_order_response_keys_camel_case() {
    let resp = OrderCreateRespOkDto {
        gateway_order_id: "order_ut0001".to_string(),
        amount: 48_300,
        currency: "INR".to_string(),
        key_id: "rzp_test_utkey".to_string(),
        internal_order_id: "a3f0019bd2c845e0".to_string(),
        subtotal: 40_000,
        cgst_total: 2300,
        sgst_total: 2300,
        delivery_charge: 3000,
        total: 47_600,
    };
    let val = serde_json::to_value(&resp).unwrap();
    let obj = val.as_object().unwrap();
    for key in [
        "gatewayOrderId",
        "amount",
        "currency",
        "keyId",
        "internalOrderId",
        "subtotal",
        "cgstTotal",
        "sgstTotal",
        "deliveryCharge",
        "total",
    ] {
        assert!(obj.contains_key(key), "missing key: {key}");
    }
    assert_eq!(val["cgstTotal"], json!(2300));
    // the gateway key secret has no field here at all
    assert!(!obj.keys().any(|k| k.to_lowercase().contains("secret")));
}

#[test]
fn contact_error_omits_clean_fields() {
    let e = CheckoutContactErrorDto::default();
    let serial = serde_json::to_string(&e).unwrap();
    assert_eq!(serial.as_str(), "{}");
}

#[test]
fn delivery_pricing_roundtrip() {
    let raw = r#"{
        "freeDeliveryThreshold": 499,
        "reducedDeliveryThreshold": 299,
        "reducedDeliveryFee": 30,
        "baseDeliveryFee": 50
    }"#;
    let dto = serde_json::from_str::<DeliveryPricingDto>(raw).unwrap();
    assert_eq!(dto.free_delivery_threshold, 499);
    let val = serde_json::to_value(&dto).unwrap();
    let expect: JsnVal = serde_json::from_str(raw).unwrap();
    assert_eq!(val, expect);
}

#[test]
fn track_request_plain_keys() {
    let raw = r#"{"phone": "+91 98765 43210", "email": "a@b.example"}"#;
    let req = serde_json::from_str::<TrackOrdersReqDto>(raw).unwrap();
    assert_eq!(req.phone.as_str(), "+91 98765 43210");
}
