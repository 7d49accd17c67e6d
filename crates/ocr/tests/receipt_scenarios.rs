use std::str::FromStr;

use billsplit_core::{calculate_total, format_currency, ItemId, ParsedItem};
use billsplit_ocr::{classify, group_fragments, parse_receipt, OcrFragment, ParserConfig, ReceiptParser};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn fragments(json: &str) -> Vec<OcrFragment> {
    serde_json::from_str(json).expect("fixture must be valid JSON")
}

const TEST_KIT_LINE: &str = r#"[
    {"text": "PRODETECT INFLUENZA A/B TEST KIT 1S",
     "bounding": {"top": 1863, "left": 628, "height": 157, "width": 1053}},
    {"text": "2.0", "bounding": {"top": 1958, "left": 1146, "height": 43, "width": 67}},
    {"text": "22.00", "bounding": {"top": 1950, "left": 1358, "height": 44, "width": 123}}
]"#;

#[test]
fn column_layout_yields_name_qty_and_price() {
    let items = parse_receipt(&fragments(TEST_KIT_LINE));

    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.id, ItemId(1));
    assert!(item.name.contains("PRODETECT INFLUENZA A/B TEST KIT 1S"), "name was {}", item.name);
    assert_eq!(item.price, dec("22.00"));
    assert_eq!(item.qty, dec("2"));
}

#[test]
fn total_line_yields_no_items() {
    let input = fragments(
        r#"[{"text": "Total: RM150.00", "bounding": {"top": 10, "left": 10, "height": 30, "width": 200}}]"#,
    );
    assert!(parse_receipt(&input).is_empty());
}

#[test]
fn selected_total_over_two_items() {
    let items = vec![
        ParsedItem::new(1, "PRODETECT INFLUENZA A/B TEST KIT 1S", dec("2"), dec("22.00")),
        ParsedItem::new(2, "FLUGO CAPSULE 10S", dec("1"), dec("15.10")),
    ];
    let total = calculate_total(&items, &[ItemId(1), ItemId(2)]);
    assert_eq!(total.amount(), dec("59.10"));
    assert!(calculate_total(&items, &[]).is_zero());
    assert_eq!(format_currency(dec("22.0")), "RM22.00");
    assert_eq!(format_currency(dec("15.1")), "RM15.10");
}

#[test]
fn parsed_items_feed_the_total() {
    let items = parse_receipt(&fragments(TEST_KIT_LINE));
    let total = calculate_total(&items, &[ItemId(1)]);
    assert_eq!(total.to_string(), "RM44.00");
}

#[test]
fn header_and_footer_lines_are_ignored() {
    let input = fragments(
        r#"[
        {"text": "KEDAI FARMASI SEJAHTERA", "bounding": {"top": 100, "left": 300, "height": 60, "width": 900}},
        {"text": "Tel / Phone: 03-1234 5678", "bounding": {"top": 180, "left": 300, "height": 40, "width": 700}},
        {"text": "VITAMIN C 1000MG", "bounding": {"top": 600, "left": 0, "height": 50, "width": 500}},
        {"text": "18.90", "bounding": {"top": 605, "left": 1300, "height": 40, "width": 120}},
        {"text": "TOTAL 18.90", "bounding": {"top": 900, "left": 900, "height": 50, "width": 400}},
        {"text": "Thank you, please visit again", "bounding": {"top": 1100, "left": 200, "height": 40, "width": 900}}
    ]"#,
    );
    let items = parse_receipt(&input);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "VITAMIN C 1000MG");
    assert_eq!(items[0].price, dec("18.90"));
    assert_eq!(items[0].qty, Decimal::ONE);
}

#[test]
fn aligned_name_column_merges_lines() {
    // Name boxes in the same column are within the proximity threshold, so
    // the greedy grouper folds them into one candidate.
    let input = fragments(
        r#"[
        {"text": "MILO 1KG RM18.90", "bounding": {"top": 100, "left": 50, "height": 40, "width": 600}},
        {"text": "NESCAFE RM12.50", "bounding": {"top": 400, "left": 50, "height": 40, "width": 600}}
    ]"#,
    );
    let config = ParserConfig::default();
    let kept = classify(&input, &config);
    assert_eq!(group_fragments(&kept, &config).len(), 1);

    let narrow = ReceiptParser::new(ParserConfig { proximity_px: 0.0, ..config });
    let items = narrow.parse(&input);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].price, dec("18.90"));
    assert_eq!(items[1].name, "NESCAFE");
    assert_eq!(items[1].id, ItemId(2));
}

#[test]
fn malformed_bounding_boxes_do_not_panic() {
    let input = fragments(
        r#"[
        {"text": "AIR MINERAL 1.20"},
        {"text": "ROTI BAKAR 3.50", "bounding": {}},
        {"bounding": {"top": 5}}
    ]"#,
    );
    // All boxes collapse to the origin, so everything lands in one group.
    let items = parse_receipt(&input);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].price, dec("3.50"));
}

#[test]
fn oversized_price_totals_without_panicking() {
    let input = fragments(
        r#"[{"text": "GOLD 2 x 1 BAR RM79228162514264337593543950335",
             "bounding": {"top": 0, "left": 0, "height": 30, "width": 600}}]"#,
    );
    let items = parse_receipt(&input);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].qty, dec("2"));
    assert_eq!(items[0].price, Decimal::MAX);

    let total = calculate_total(&items, &[ItemId(1)]);
    assert_eq!(total.amount(), Decimal::MAX);
    assert_eq!(total.to_string(), "RM79228162514264337593543950335.00");
}
