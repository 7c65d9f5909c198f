//! Browser tests. Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use magic_grid_wasm::MagicGrid;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn gallery(id: &str, heights: &[u32]) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let container: HtmlElement = document.create_element("div").unwrap().unchecked_into();
    container.set_id(id);
    container.style().set_property("width", "1000px").unwrap();
    for height in heights {
        let item: HtmlElement = document.create_element("div").unwrap().unchecked_into();
        item.style().set_property("width", "300px").unwrap();
        item.style()
            .set_property("height", &format!("{}px", height))
            .unwrap();
        container.append_child(&item).unwrap();
    }
    document.body().unwrap().append_child(&container).unwrap();
    container
}

fn options(selector: &str, items: u32) -> JsValue {
    let json = format!(r#"{{"container": "{}", "items": {}}}"#, selector, items);
    js_sys::JSON::parse(&json).unwrap()
}

#[wasm_bindgen_test]
fn lays_out_present_items() {
    let container = gallery("present", &[200, 150, 300]);
    let grid = MagicGrid::new(options("#present", 3))
        .ok()
        .expect("grid starts");

    assert_eq!(grid.state(), "listening");
    assert!(grid.started());
    assert_eq!(container.style().get_property_value("height").unwrap(), "325px");
    grid.dispose();
    assert_eq!(grid.state(), "disposed");
}

#[wasm_bindgen_test]
fn polls_for_missing_items() {
    gallery("partial", &[200]);
    let grid = MagicGrid::new(options("#partial", 4))
        .ok()
        .expect("grid starts");

    assert_eq!(grid.state(), "polling");
    assert!(matches!(grid.last_layout(), Ok(layout) if layout.is_undefined()));
    grid.dispose();
}

#[wasm_bindgen_test]
fn rejects_missing_container() {
    assert!(MagicGrid::from_json(r#"{"items": 3}"#).is_err());
}
