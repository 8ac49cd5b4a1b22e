//! Writes a [`SliderFrame`] onto DOM styles.

use slidekit_ui::{SlideFrame, SliderFrame};
use web_sys::{CssStyleDeclaration, HtmlElement};

use crate::error::WebSliderError;

pub(crate) fn set(
    style: &CssStyleDeclaration,
    property: &'static str,
    value: &str,
) -> Result<(), WebSliderError> {
    style
        .set_property(property, value)
        .map_err(|source| WebSliderError::Style { property, source })
}

fn px(value: f32) -> String {
    format!("{value}px")
}

fn translate_x(value: f32) -> String {
    format!("translate3d({value}px, 0, 0)")
}

fn horizontal_padding(padding: f32) -> String {
    format!("0 {}", px(padding))
}

/// Styles the container keeps for the slider's whole life.
pub(crate) fn apply_container(container: &HtmlElement) -> Result<(), WebSliderError> {
    let style = container.style();
    set(&style, "overflow", "hidden")?;
    // Vertical scrolling stays with the browser; horizontal pans come to us.
    set(&style, "touch-action", "pan-y")?;
    set(&style, "user-select", "none")
}

pub(crate) fn apply_track(track: &HtmlElement) -> Result<(), WebSliderError> {
    let style = track.style();
    set(&style, "display", "flex")?;
    set(&style, "will-change", "transform")
}

pub(crate) fn apply_frame<C>(
    container: &HtmlElement,
    track: &HtmlElement,
    slides: &[HtmlElement],
    frame: &SliderFrame<'_, C>,
) -> Result<(), WebSliderError> {
    set(&container.style(), "cursor", frame.cursor.css_value())?;

    let style = track.style();
    set(&style, "transform", &translate_x(frame.translate_x))?;
    set(&style, "margin-left", &px(frame.track_margin))?;
    set(&style, "margin-right", &px(frame.track_margin))?;

    for (element, slide) in slides.iter().zip(&frame.slides) {
        apply_slide(element, slide)?;
    }
    Ok(())
}

fn apply_slide<C>(element: &HtmlElement, slide: &SlideFrame<'_, C>) -> Result<(), WebSliderError> {
    let style = element.style();
    set(&style, "box-sizing", "border-box")?;
    set(&style, "flex-shrink", "0")?;
    set(&style, "width", &px(slide.width))?;
    set(&style, "padding", &horizontal_padding(slide.padding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_css_pixels() {
        assert_eq!(px(300.0), "300px");
        assert_eq!(px(-8.0), "-8px");
        assert_eq!(px(12.5), "12.5px");
        assert_eq!(translate_x(-600.0), "translate3d(-600px, 0, 0)");
        assert_eq!(horizontal_padding(10.0), "0 10px");
    }
}
