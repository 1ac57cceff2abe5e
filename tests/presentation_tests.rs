//! Presentation options: display method, sizes, fit, CSS rules and callbacks.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use common::{options, split_default, split_with};
use fixtures::uniform;
use tablepanes::present::{BindingLog, Fit};
use tablepanes::{
    split_indexed, Document, LayoutHost, Length, PanesError, Quadrant, SplitOptions,
};
use test_case::test_case;

fn fixed(doc: &Document, node: tablepanes::NodeId) -> (Option<Length>, Option<Length>) {
    let n = doc.node(node).unwrap();
    (n.fixed_width.clone(), n.fixed_height.clone())
}

// ============================================================================
// DISPLAY METHOD
// ============================================================================

#[test]
fn test_float_is_the_default() {
    let (doc, panes) = split_default(&uniform(2, 2), 1, 1);

    assert_eq!(doc.style(panes.left, "float"), Some("left"));
    assert_eq!(doc.style(panes.right, "float"), None);
    assert_eq!(doc.style(panes.container, "display"), None);
}

#[test_case("inline-block", None, Some("inline-block") ; "inline block")]
#[test_case("table-cell", Some("table"), Some("table-cell") ; "table cell")]
#[test_case("flex", Some("flex"), None ; "flex")]
fn test_display_method(method: &str, container: Option<&str>, halves: Option<&str>) {
    let json = format!(r#"{{"display-method": "{method}"}}"#);
    let (doc, panes) = split_with(&uniform(2, 2), 1, 1, &options(&json));

    assert_eq!(doc.style(panes.container, "display"), container);
    assert_eq!(doc.style(panes.left, "display"), halves);
    assert_eq!(doc.style(panes.right, "display"), halves);
    assert_eq!(doc.style(panes.left, "float"), None);
}

#[test]
fn test_table_cell_centers_the_container() {
    let (doc, panes) = split_with(&uniform(2, 2), 1, 1, &options(r#"{"display-method": "table-cell"}"#));

    assert_eq!(doc.style(panes.container, "table-layout"), Some("fixed"));
    assert_eq!(doc.style(panes.container, "margin"), Some("0 auto"));
}

#[test]
fn test_unknown_display_method_is_rejected() {
    let err = SplitOptions::from_json(r#"{"display-method": "grid"}"#).unwrap_err();
    assert!(matches!(err, PanesError::Json(_)));
}

// ============================================================================
// SIZES
// ============================================================================

#[test]
fn test_sizes_go_to_their_panes() {
    let json = r#"{
        "height": 300,
        "width": "80%",
        "top-height": "40px",
        "bottom-height": 120,
        "left-width": 64,
        "right-width": 200
    }"#;
    let (doc, panes) = split_with(&uniform(5, 5), 2, 2, &options(json));

    assert_eq!(
        fixed(&doc, panes.container),
        (Some(Length::Css("80%".into())), Some(Length::Px(300.0)))
    );
    assert_eq!(
        fixed(&doc, panes.pane(Quadrant::TopLeft)),
        (Some(Length::Px(64.0)), Some(Length::Px(40.0)))
    );
    assert_eq!(
        fixed(&doc, panes.pane(Quadrant::TopRight)),
        (Some(Length::Px(200.0)), Some(Length::Px(40.0)))
    );
    assert_eq!(
        fixed(&doc, panes.pane(Quadrant::BottomLeft)),
        (Some(Length::Px(64.0)), Some(Length::Px(120.0)))
    );
    assert_eq!(
        fixed(&doc, panes.pane(Quadrant::BottomRight)),
        (Some(Length::Px(200.0)), Some(Length::Px(120.0)))
    );
}

#[test]
fn test_no_sizes_force_nothing() {
    let (doc, panes) = split_default(&uniform(2, 2), 1, 1);

    assert_eq!(fixed(&doc, panes.container), (None, None));
    for q in Quadrant::ALL {
        assert_eq!(fixed(&doc, panes.pane(q)), (None, None));
    }
}

// ============================================================================
// FIT
// ============================================================================

fn fitted() -> (Document, tablepanes::PaneSet) {
    split_with(
        &uniform(5, 5),
        2,
        2,
        &options(r#"{"width": 300, "height": 200, "display-method": "flex", "fit": true}"#),
    )
}

#[test]
fn test_fit_sizes_the_scrolling_panes() {
    let (doc, panes) = fitted();

    assert_eq!(panes.fit, Some(Fit { dw: 0.0, dh: 0.0 }));
    // 300 minus the 64px left column; 200 minus the 36px top row.
    for q in [Quadrant::TopRight, Quadrant::BottomRight] {
        assert_eq!(fixed(&doc, panes.pane(q)).0, Some(Length::Px(236.0)));
    }
    for q in [Quadrant::BottomLeft, Quadrant::BottomRight] {
        assert_eq!(fixed(&doc, panes.pane(q)).1, Some(Length::Px(164.0)));
    }
    assert_eq!(fixed(&doc, panes.pane(Quadrant::TopLeft)), (None, None));
}

#[test]
fn test_fit_follows_container_resize() {
    let (mut doc, mut panes) = fitted();
    let mut host = LayoutHost::default();

    doc.fix_width(panes.container, 400.0_f32).unwrap();
    let size = panes.resize(&mut host, &mut doc).unwrap();

    assert_eq!(size, Some((336.0, 164.0)));
    assert_eq!(
        fixed(&doc, panes.pane(Quadrant::BottomRight)).0,
        Some(Length::Px(336.0))
    );
    assert_eq!(panes.sync.viewport(Quadrant::BottomRight).width, 336.0);
}

#[test]
fn test_fit_never_goes_negative() {
    let (mut doc, mut panes) = fitted();

    doc.fix_width(panes.container, 10.0_f32).unwrap();
    doc.fix_height(panes.container, 10.0_f32).unwrap();
    let size = panes.resize(&mut LayoutHost::default(), &mut doc).unwrap();

    assert_eq!(size, Some((0.0, 0.0)));
}

#[test]
fn test_fit_overrides_right_width() {
    let (doc, panes) = split_with(
        &uniform(5, 5),
        2,
        2,
        &options(r#"{"width": 300, "height": 200, "right-width": 80, "fit": true}"#),
    );

    // Both right panes are 80px, so the wrapper adds nothing around them.
    assert_eq!(panes.fit, Some(Fit { dw: 0.0, dh: 0.0 }));
    for q in [Quadrant::TopRight, Quadrant::BottomRight] {
        assert_eq!(fixed(&doc, panes.pane(q)).0, Some(Length::Px(236.0)));
    }
    assert_eq!(fixed(&doc, panes.pane(Quadrant::TopLeft)).0, None);
}

// ============================================================================
// CSS
// ============================================================================

#[test]
fn test_css_rules_reach_panes_and_cells() {
    let json = r##"{
        "css": {
            ".table4panes-top": { "background": "#eee", "z-index": 3 },
            "td": { "padding": 4 }
        }
    }"##;
    let (doc, panes) = split_with(&uniform(2, 2), 1, 1, &options(json));

    for q in [Quadrant::TopLeft, Quadrant::TopRight] {
        assert_eq!(doc.style(panes.pane(q), "background"), Some("#eee"));
        assert_eq!(doc.style(panes.pane(q), "z-index"), Some("3"));
    }
    assert_eq!(doc.style(panes.pane(Quadrant::BottomLeft), "background"), None);
    for q in Quadrant::ALL {
        for c in doc.cells(panes.table(q)) {
            assert_eq!(doc.style(c, "padding"), Some("4px"));
        }
    }
}

#[test]
fn test_later_css_rules_win() {
    let json = r##"{
        "css": {
            "div": { "color": "red" },
            "#g-bottom-right": { "color": "blue" }
        }
    }"##;
    let mut grid = uniform(2, 2);
    grid.id = Some("g".to_string());
    let (doc, panes) = split_with(&grid, 1, 1, &options(json));

    assert_eq!(doc.style(panes.pane(Quadrant::BottomRight), "color"), Some("blue"));
    assert_eq!(doc.style(panes.pane(Quadrant::BottomLeft), "color"), Some("red"));
    assert_eq!(doc.style(panes.container, "color"), Some("red"));
}

#[test]
fn test_bad_css_selector_fails_the_split() {
    let mut doc = Document::new();
    let table = uniform(2, 2).build(&mut doc).unwrap();
    let opts = options(r#"{"css": {"td >": {"color": "red"}}}"#);

    let err = tablepanes::split(&mut doc, &mut LayoutHost::default(), table, 1, 1, &opts).unwrap_err();
    assert!(matches!(err, PanesError::Selector(_)));
}

#[test_case("*" ; "universal")]
#[test_case("td" ; "tag")]
#[test_case("div.table4panes-top" ; "compound")]
#[test_case("#g-top-left" ; "id")]
#[test_case("div > table" ; "child")]
#[test_case("th, td" ; "list")]
fn test_container_selectors_are_accepted(selector: &str) {
    let mut grid = uniform(2, 2);
    grid.id = Some("g".to_string());
    let json = serde_json::json!({ "css": { selector: { "color": "red" } } });
    let opts = options(&json.to_string());

    let (doc, panes) = split_with(&grid, 1, 1, &opts);
    let touched = std::iter::once(panes.container)
        .chain(doc.descendants(panes.container))
        .filter(|n| doc.style(*n, "color") == Some("red"))
        .count();
    assert!(touched > 0);
}

// Rules are matched against the split container only, so selectors that
// need sibling positions or attributes are refused up front.
#[test_case("tr:nth-child(odd) td" ; "structural pseudo class")]
#[test_case("[data-x]" ; "attribute")]
#[test_case("td:first-child" ; "first child")]
#[test_case("td >" ; "dangling combinator")]
fn test_page_selectors_are_rejected(selector: &str) {
    let mut doc = Document::new();
    let table = uniform(2, 2).build(&mut doc).unwrap();
    let json = serde_json::json!({ "callbacks": { selector: { "event": "click", "func": "f" } } });
    let opts = options(&json.to_string());

    let err = tablepanes::split(&mut doc, &mut LayoutHost::default(), table, 1, 1, &opts).unwrap_err();
    assert!(matches!(err, PanesError::Selector(ref s) if s == selector));
}

// ============================================================================
// CALLBACKS
// ============================================================================

#[test]
fn test_callbacks_are_recorded_in_order() {
    let json = r##"{
        "callbacks": {
            "td": { "event": "click", "func": "onCell", "data": { "k": 1 } },
            "#g-top-left": [
                { "event": "scroll", "func": "a" },
                { "event": "focus", "func": "b" }
            ]
        }
    }"##;
    let mut grid = uniform(2, 2);
    grid.id = Some("g".to_string());
    let (_, panes) = split_with(&grid, 1, 1, &options(json));

    let events: Vec<&str> = panes.bindings.iter().map(|b| b.event.as_str()).collect();
    assert_eq!(events, vec!["click", "click", "click", "click", "scroll", "focus"]);
    assert_eq!(panes.bindings[0].data, Some(serde_json::json!({ "k": 1 })));
    assert_eq!(panes.bindings[4].node, panes.pane(Quadrant::TopLeft));
    assert!(panes.bindings[5].data.is_none());
}

#[test]
fn test_custom_binder_receives_callbacks() {
    let mut doc = Document::new();
    let table = uniform(2, 2).build(&mut doc).unwrap();
    let opts = options(r#"{"callbacks": {"th": {"event": "click", "func": "f"}, "tr": {"event": "click", "func": "g"}}}"#);
    let mut log = BindingLog::default();

    let panes = split_indexed(&mut doc, &mut LayoutHost::default(), &mut log, 0, table, 1, 1, &opts)
        .unwrap()
        .applied()
        .unwrap();

    // No header cells; one binding per row of each of the four grids.
    assert_eq!(log.bindings.len(), 4);
    assert!(log.bindings.iter().all(|b| b.func == "g"));
    assert!(panes.bindings.is_empty());
}
