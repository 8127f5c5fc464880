use anyhow::Context as _;

use super::*;

#[test]
fn each_layer_has_its_own_prefix() {
    let cases = [
        (BrewError::validation("frame_count must be > 0"), "validation error:"),
        (BrewError::asset("404"), "asset error:"),
        (BrewError::render("empty surface"), "render error:"),
        (BrewError::serde("trailing comma"), "serialization error:"),
    ];
    for (err, prefix) in cases {
        assert!(err.to_string().starts_with(prefix), "{err}");
    }
}

#[test]
fn io_context_passes_through_transparently() {
    let res: BrewResult<Vec<u8>> = std::fs::read("/nonexistent/coffee_frame_001.jpg")
        .context("read frame bytes from 'coffee_frame_001.jpg'")
        .map_err(BrewError::from);
    let err = res.unwrap_err();
    assert!(matches!(err, BrewError::Other(_)));
    assert_eq!(err.to_string(), "read frame bytes from 'coffee_frame_001.jpg'");
}
