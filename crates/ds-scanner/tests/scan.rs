//! End-to-end scans against in-memory documents.

mod common;

use common::{DESIGN_SYSTEM, FaultyHost, document};
use ds_core::{
    ColorCategory, PaddingSource, PaintKind, ScanSession, ScannerConfig, SlotCategory,
    TextSlotKind, TokenValue,
};
use ds_scanner::{
    ColorResolver, FOLDED_CONFIDENCE, FileStore, ScanError, ScanStats, Scanner, SnapshotHost,
    StyleRegistry, load_last_scan, load_legacy_components, persist_session,
};

async fn scan(json: &str) -> ds_scanner::ScanReport {
    Scanner::default()
        .scan(&SnapshotHost::new(document(json)))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_list_item_set_end_to_end() {
    let report = scan(DESIGN_SYSTEM).await;
    let list_item = &report.session.components()[0];

    assert_eq!(list_item.id, "10:1");
    assert_eq!(list_item.suggested_type, "list-item");
    assert_eq!(list_item.confidence, FOLDED_CONFIDENCE);

    let variants = list_item.variant_options.as_ref().unwrap();
    assert_eq!(variants["Condition"], ["1-line", "2-line"]);

    let headline = &list_item.text_slots.as_ref().unwrap()["Headline"];
    assert!(headline.required);
    assert_eq!(headline.kind, TextSlotKind::SingleLine);
    assert_eq!(headline.max_length, Some(20));

    let leading = &list_item.component_slots.as_ref().unwrap()["Leading"];
    assert_eq!(leading.component_id.as_deref(), Some("20:1"));
    assert_eq!(leading.category, SlotCategory::Icon);

    let page = list_item.page_info.as_ref().unwrap();
    assert_eq!(page.page_name, "Components");
    assert!(page.is_current_page);
}

#[tokio::test]
async fn test_components_in_traversal_order() {
    let report = scan(DESIGN_SYSTEM).await;
    let ids: Vec<_> = report
        .session
        .components()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, ["10:1", "11:1", "20:1"]);
    assert!(report.errors.is_empty());
    assert_eq!(report.stats.analyzed, 3);
    assert_eq!(report.session.file_key(), Some("FILE123"));
}

#[tokio::test]
async fn test_confidences_in_unit_range() {
    let report = scan(DESIGN_SYSTEM).await;
    for component in report.session.components() {
        assert!((0.0..=1.0).contains(&component.confidence), "{}", component.name);
    }
}

#[tokio::test]
async fn test_style_context_and_layout() {
    let report = scan(DESIGN_SYSTEM).await;
    let components = report.session.components();

    let list_context = components[0].style_context.as_ref().unwrap();
    assert_eq!(list_context.text_color.as_deref(), Some("Primary/500"));
    assert_eq!(list_context.text_style.as_deref(), Some("Body/Medium"));

    let button = &components[1];
    assert_eq!(button.suggested_type, "button");
    let context = button.style_context.as_ref().unwrap();
    assert_eq!(context.primary_color.as_deref(), Some("color/primary"));
    let layout = button.layout_behavior.as_ref().unwrap();
    assert!(layout.is_touch_target);
    assert!(layout.has_internal_padding);

    let icon = &components[2];
    assert!(icon.layout_behavior.is_none());
}

#[tokio::test]
async fn test_color_provenance_precedence() {
    let host = SnapshotHost::new(document(DESIGN_SYSTEM));
    let build = StyleRegistry::build(&host, &ScanStats::new()).await;
    let resolver = ColorResolver::new(&build.registry);

    let bound: ds_core::Paint = serde_json::from_str(
        r#"{"type": "SOLID", "color": {"r": 0, "g": 0.4, "b": 1},
            "boundVariables": {"color": {"type": "VARIABLE_ALIAS", "id": "V:1"}}}"#,
    )
    .unwrap();
    let raw: ds_core::Paint =
        serde_json::from_str(r#"{"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0}}"#).unwrap();

    let token = resolver.resolve(&bound, Some("S:brand,"));
    assert_eq!(token.design_token.as_deref(), Some("color/primary"));
    assert_eq!(token.paint_style_name.as_deref(), Some("Primary/500"));
    assert_eq!(token.reference(), Some("color/primary"));

    let style = resolver.resolve(&raw, Some("S:brand"));
    assert_eq!(style.reference(), Some("Primary/500"));
    assert!(style.uses_design_system_color);
    assert!(!style.uses_design_token);

    let plain = resolver.resolve(&raw, None);
    assert_eq!(plain.kind, PaintKind::Solid);
    assert_eq!(plain.reference(), None);
    assert_eq!(plain.color.as_deref(), Some("#ff0000"));
}

#[tokio::test]
async fn test_catalogues() {
    let report = scan(DESIGN_SYSTEM).await;
    let session = &report.session;

    let colors = session.color_styles().unwrap();
    assert_eq!(colors.bucket(ColorCategory::Primary)[0].name, "Primary/500");
    assert_eq!(
        colors.bucket(ColorCategory::Primary)[0].variant.as_deref(),
        Some("500")
    );
    assert_eq!(colors.bucket(ColorCategory::Neutral).len(), 1);

    assert_eq!(session.text_styles().unwrap()[0].name, "Body/Medium");

    let tokens = session.design_tokens().unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].mode, "Light");
    assert!(matches!(tokens[0].value, TokenValue::Color(c) if c.b == 1.0));
    assert!(!report.stats.token_fallback);
}

#[tokio::test]
async fn test_padding_precedence() {
    let report = scan(
        r#"{"pages": [{"id": "0:1", "name": "P", "children": [
            {"id": "1", "name": "Direct", "type": "COMPONENT", "width": 200, "height": 60,
             "layoutMode": "VERTICAL", "paddingTop": 8, "paddingLeft": 8,
             "children": [
                {"id": "1a", "type": "FRAME", "layoutMode": "VERTICAL", "paddingTop": 4,
                 "x": 20, "y": 20, "width": 10, "height": 10}
             ]},
            {"id": "2", "name": "Nested", "type": "COMPONENT", "width": 200, "height": 60,
             "children": [
                {"id": "2a", "type": "FRAME", "layoutMode": "VERTICAL", "paddingLeft": 12,
                 "x": 20, "y": 20, "width": 10, "height": 10}
             ]},
            {"id": "3", "name": "Geometric", "type": "COMPONENT", "width": 120, "height": 48,
             "children": [
                {"id": "3a", "type": "TEXT", "x": 16, "y": 12, "width": 88, "height": 24}
             ]},
            {"id": "4", "name": "Offset", "type": "COMPONENT", "width": 1000, "height": 48,
             "children": [
                {"id": "4a", "type": "TEXT", "x": 500, "y": 12, "width": 88, "height": 24}
             ]}
        ]}]}"#,
    )
    .await;
    let components = report.session.components();

    let direct = components[0].internal_padding.unwrap();
    assert_eq!(direct.source, PaddingSource::Direct);
    assert_eq!(direct.padding.top, 8.0);

    let nested = components[1].internal_padding.unwrap();
    assert_eq!(nested.source, PaddingSource::Nested);
    assert_eq!(nested.padding.left, 12.0);

    let geometric = components[2].internal_padding.unwrap();
    assert_eq!(geometric.source, PaddingSource::Geometric);
    assert_eq!(geometric.padding.right, 16.0);

    assert!(components[3].internal_padding.is_none());
}

#[tokio::test]
async fn test_scans_are_idempotent() {
    let host = SnapshotHost::new(document(DESIGN_SYSTEM));
    let scanner = Scanner::default();
    let first = scanner.scan(&host).await.unwrap().session;
    let second = scanner.scan(&host).await.unwrap().session;

    assert_eq!(first.components(), second.components());
    assert_eq!(first.color_styles(), second.color_styles());
    assert_eq!(first.text_styles(), second.text_styles());
    assert_eq!(first.design_tokens(), second.design_tokens());
    assert_eq!(first.version(), second.version());
}

#[tokio::test]
async fn test_session_json_round_trip() {
    let session = scan(DESIGN_SYSTEM).await.session;
    let json = serde_json::to_string(&session).unwrap();
    let back: ScanSession = serde_json::from_str(&json).unwrap();
    assert_eq!(back, session);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for category in ColorCategory::ALL {
        assert!(value["colorStyles"][category.as_str()].is_array());
    }
    assert_eq!(value["version"], ScannerConfig::default().session_version);
}

#[tokio::test]
async fn test_failed_page_is_skipped() {
    let host = FaultyHost::new(document(DESIGN_SYSTEM)).failing_page("0:2");
    let report = Scanner::default().scan(&host).await.unwrap();

    assert_eq!(report.session.components().len(), 2);
    assert_eq!(report.stats.pages_skipped, 1);
    assert_eq!(report.stats.pages_scanned, 1);
    assert!(matches!(
        &report.errors[0],
        ScanError::PageSkipped { page_id, .. } if page_id == "0:2"
    ));
}

#[tokio::test]
async fn test_page_load_failure_is_fatal() {
    let host = FaultyHost::new(document(DESIGN_SYSTEM)).failing_pages();
    let err = Scanner::default().scan(&host).await.unwrap_err();
    assert!(matches!(err, ScanError::PagesUnavailable(_)));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_tokens_fall_back_to_color_styles() {
    let host = FaultyHost::new(document(DESIGN_SYSTEM)).failing_variables();
    let report = Scanner::default().scan(&host).await.unwrap();

    assert!(report.stats.token_fallback);
    assert!(report.errors.iter().any(|e| matches!(e, ScanError::Tokens(_))));

    let tokens = report.session.design_tokens().unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].id, "fallback-S:brand,");
    assert_eq!(tokens[0].collection, "primary-colors");
    assert_eq!(tokens[0].mode, "default");

    let button = &report.session.components()[1];
    let context = button.style_context.as_ref().unwrap();
    assert_eq!(context.primary_color.as_deref(), Some("Primary/500"));
}

#[tokio::test]
async fn test_failed_slot_lookups_are_omitted() {
    let host = FaultyHost::new(document(DESIGN_SYSTEM)).failing_main_components();
    let report = Scanner::default().scan(&host).await.unwrap();

    let list_item = &report.session.components()[0];
    assert!(list_item.component_slots.is_none());
    assert!(list_item.text_slots.is_some());
    assert_eq!(report.stats.slot_failures, 1);
    assert_eq!(report.stats.analyzed, 3);
}

#[tokio::test]
async fn test_styles_unavailable_still_scans() {
    let host = FaultyHost::new(document(DESIGN_SYSTEM)).failing_styles();
    let report = Scanner::default().scan(&host).await.unwrap();

    assert_eq!(report.session.components().len(), 3);
    assert!(report.session.color_styles().is_none());
    assert!(report.session.text_styles().is_none());
    assert_eq!(report.session.design_tokens().unwrap().len(), 1);
}

#[tokio::test]
async fn test_degraded_record_snapshot() {
    let mut doc = document(
        r#"{"pages": [{"id": "0:1", "name": "Sheets", "children": [
            {"id": "5:1", "name": "Bottom-Sheet", "type": "COMPONENT_SET",
             "variantGroupProperties": {"State": {"values": ["Collapsed", "Expanded"]}},
             "children": [{"id": "5:2", "name": "State=Collapsed", "type": "COMPONENT"}]}
        ]}]}"#,
    );
    if let ds_core::NodeKind::ComponentSet(set) = &mut doc.pages[0].children[0].kind {
        set.frame.children[0].height = f64::NAN;
    }
    let report = Scanner::default()
        .scan(&SnapshotHost::new(doc))
        .await
        .unwrap();

    assert_eq!(report.stats.degraded, 1);
    insta::assert_json_snapshot!(report.session.components()[0], @r#"
    {
      "id": "5:1",
      "name": "Bottom-Sheet",
      "suggestedType": "bottomsheet",
      "confidence": 0.4,
      "isFromLibrary": false,
      "variantOptions": {
        "State": [
          "Collapsed",
          "Expanded"
        ]
      },
      "pageInfo": {
        "pageName": "Sheets",
        "pageId": "0:1",
        "isCurrentPage": false
      }
    }
    "#);
}

#[tokio::test]
async fn test_dangling_default_variant_keeps_full_analysis() {
    let report = scan(
        r#"{"pages": [{"id": "0:1", "name": "Components", "children": [
            {"id": "10:1", "name": "List Item", "type": "COMPONENT_SET",
             "defaultVariantId": "10:99",
             "variantGroupProperties": {"Condition": {"values": ["1-line", "2-line"]}},
             "children": [
                {"id": "10:2", "name": "Condition=1-line", "type": "COMPONENT", "children": [
                    {"id": "10:3", "name": "Headline", "type": "TEXT", "width": 168, "fontSize": 14}
                ]}
             ]}
        ]}]}"#,
    )
    .await;

    let list_item = &report.session.components()[0];
    assert_eq!(list_item.confidence, FOLDED_CONFIDENCE);
    assert!(list_item.text_slots.as_ref().unwrap().contains_key("Headline"));
    assert_eq!(
        list_item.variant_options.as_ref().unwrap()["Condition"],
        ["1-line", "2-line"]
    );
    assert_eq!(report.stats.degraded, 0);
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn test_library_component_slot_keeps_main_id() {
    let report = scan(
        r#"{"pages": [{"id": "0:1", "name": "Components", "children": [
            {"id": "3:1", "name": "Chip", "type": "COMPONENT", "children": [
                {"id": "3:2", "name": "Leading Icon", "type": "INSTANCE",
                 "mainComponentId": "LIB:icon/star"}
            ]}
        ]}]}"#,
    )
    .await;

    let chip = &report.session.components()[0];
    let slot = &chip.component_slots.as_ref().unwrap()["Leading Icon"];
    assert_eq!(slot.component_id.as_deref(), Some("LIB:icon/star"));
    assert_eq!(slot.category, SlotCategory::Icon);
    assert_eq!(report.stats.slot_failures, 0);
}

#[tokio::test]
async fn test_consecutive_scans_do_not_share_styles() {
    let scanner = Scanner::default();
    let first = scanner
        .scan(&SnapshotHost::new(document(
            r#"{"pages": [{"id": "0:1", "name": "A", "children": [
                {"id": "1:1", "name": "Card", "type": "COMPONENT", "fillStyleId": "S:old,",
                 "fills": [{"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0}}]}
            ]}],
            "paintStyles": [{"id": "S:old,", "name": "Legacy/Red",
                "paints": [{"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0}}]}]}"#,
        )))
        .await
        .unwrap();
    let second = scanner
        .scan(&SnapshotHost::new(document(
            r#"{"pages": [{"id": "0:1", "name": "B", "children": [
                {"id": "1:1", "name": "Card", "type": "COMPONENT", "fillStyleId": "S:old,",
                 "fills": [{"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0}}]}
            ]}],
            "paintStyles": [{"id": "S:new,", "name": "Brand/Blue",
                "paints": [{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 1}}]}]}"#,
        )))
        .await
        .unwrap();

    let first_context = first.session.components()[0].style_context.as_ref().unwrap();
    assert_eq!(first_context.primary_color.as_deref(), Some("Legacy/Red"));

    let json = serde_json::to_string(&second.session).unwrap();
    assert!(!json.contains("Legacy/Red"));
    let second_context = second.session.components()[0].style_context.as_ref().unwrap();
    assert_eq!(second_context.primary_color, None);
    assert_eq!(second.session.color_styles().unwrap().len(), 1);
}

#[tokio::test]
async fn test_persisted_scan_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let root = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    let store = FileStore::new(root);

    let session = scan(DESIGN_SYSTEM).await.session;
    persist_session(&store, &session).await.unwrap();

    assert_eq!(load_last_scan(&store).await.unwrap(), Some(session.clone()));
    assert_eq!(
        load_legacy_components(&store).await.unwrap().unwrap(),
        session.components()
    );
    assert_eq!(
        ds_scanner::component_id_for_type(&store, "list-item")
            .await
            .unwrap()
            .as_deref(),
        Some("10:1")
    );
}
