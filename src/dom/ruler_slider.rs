//! Ruler slider DOM binding
//!
//! Builds the slider, its decoration rows and the value readouts from a
//! `RulerDisplayList`, and keeps the readouts in step with the handle.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement};

use crate::config;
use crate::ruler::{bind_value_display, RenderRow, RenderRowKind, RulerDisplayList, RulerError, RulerLayout, RulerRange};
use super::{document, dom_error};

/// Class of the element wrapping one slider and its decorations
pub const SLIDER_CLASS: &str = "ruler-slider";

/// Inline style of one tick or label inside a row
pub fn mark_style(position: f64) -> String {
    format!("position: absolute; left: {}%;", position)
}

/// Inline style of the readout handle at `position` percent along the track
pub fn handle_style(position: f64) -> String {
    format!("position: relative; left: {}%;", position)
}

fn create_div(document: &Document, class: &str) -> Result<Element, RulerError> {
    let div = document.create_element("div").map_err(dom_error)?;
    div.set_class_name(class);
    Ok(div)
}

fn render_row(document: &Document, row: &RenderRow) -> Result<Element, RulerError> {
    let div = create_div(document, &row.classes.join(" "))?;
    div.set_attribute("style", &format!("position: relative; {}", row.style))
        .map_err(dom_error)?;
    for (i, position) in row.positions.iter().enumerate() {
        let mark_class = match row.kind {
            RenderRowKind::Ticks => "ruler-tick",
            RenderRowKind::Labels => "ruler-label",
        };
        let mark = create_div(document, mark_class)?;
        mark.set_attribute("style", &mark_style(*position)).map_err(dom_error)?;
        if let Some(label) = row.labels.get(i) {
            mark.set_text_content(Some(label));
        }
        div.append_child(&mark).map_err(dom_error)?;
    }
    Ok(div)
}

/// Handle carrying the value readouts; it moves with the slider value
#[derive(Clone)]
struct Readout {
    handle: Element,
    metric: Element,
    english: Element,
}

impl Readout {
    fn build(document: &Document) -> Result<Self, RulerError> {
        let handle = create_div(document, "ruler-handle")?;
        let metric = create_div(document, "metric_display")?;
        let second_handle = create_div(document, "second_handle")?;
        let english = create_div(document, "english_display")?;
        handle.append_child(&metric).map_err(dom_error)?;
        second_handle.append_child(&english).map_err(dom_error)?;
        handle.append_child(&second_handle).map_err(dom_error)?;
        Ok(Self { handle, metric, english })
    }

    fn render(&self, range: &RulerRange, value_mm: f64) {
        let display = bind_value_display(value_mm);
        self.metric.set_inner_html(&display.metric_lines.join("<br>"));
        self.english.set_text_content(Some(&display.english_text));
        if let Err(e) = self
            .handle
            .set_attribute("style", &handle_style(range.percent(value_mm)))
        {
            log::warn!("failed to move ruler readout: {:?}", e);
        }
    }
}

/// A length slider drawn as a dual metric/English ruler
#[wasm_bindgen]
pub struct RulerSlider {
    range: RulerRange,
    display_list: RulerDisplayList,
    root: Element,
    input: HtmlInputElement,
    readout: Readout,
    listener: Option<Closure<dyn FnMut(Event)>>,
}

impl RulerSlider {
    /// Build the slider inside the element with id `container_id`
    pub fn build(
        container_id: &str,
        element_id: &str,
        pixel_width: f64,
        min_mm: f64,
        max_mm: f64,
        start_mm: f64,
    ) -> Result<Self, RulerError> {
        let range = RulerRange::new(min_mm, max_mm, pixel_width)?;
        let layout = RulerLayout::compute(range, config::current().ruler)?;
        let display_list = RulerDisplayList::from_layout(&layout);

        let document = document()?;
        let container = document.get_element_by_id(container_id).ok_or_else(|| {
            RulerError::ConstructionError(format!("container #{} not found", container_id))
        })?;

        let root = create_div(&document, SLIDER_CLASS)?;
        root.set_attribute("style", &format!("width: {}px;", pixel_width))
            .map_err(dom_error)?;

        let decoration = create_div(&document, &display_list.container)?;
        for row in &display_list.rows {
            let row_el = render_row(&document, row)?;
            decoration.append_child(&row_el).map_err(dom_error)?;
        }
        root.append_child(&decoration).map_err(dom_error)?;

        let input: HtmlInputElement = document
            .create_element("input")
            .map_err(dom_error)?
            .dyn_into()
            .map_err(|_| RulerError::ConstructionError("slider control unavailable".to_string()))?;
        input.set_type("range");
        input.set_id(element_id);
        input.set_name(element_id);
        input.set_min(&min_mm.to_string());
        input.set_max(&max_mm.to_string());
        input.set_step("any");
        input.set_attribute("style", &format!("width: {}px;", pixel_width))
            .map_err(dom_error)?;
        root.append_child(&input).map_err(dom_error)?;
        input.set_value_as_number(range.clamp(start_mm));

        let readout = Readout::build(&document)?;
        root.append_child(&readout.handle).map_err(dom_error)?;
        container.append_child(&root).map_err(dom_error)?;

        let listener = {
            let input = input.clone();
            let readout = readout.clone();
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                readout.render(&range, input.value_as_number());
            })
        };
        input
            .add_event_listener_with_callback("input", listener.as_ref().unchecked_ref())
            .map_err(dom_error)?;

        readout.render(&range, input.value_as_number());
        log::debug!(
            "ruler slider #{} built: {} rows over {}px",
            element_id,
            display_list.rows.len(),
            pixel_width
        );

        Ok(Self {
            range,
            display_list,
            root,
            input,
            readout,
            listener: Some(listener),
        })
    }

    pub fn display_list(&self) -> &RulerDisplayList {
        &self.display_list
    }

    pub fn is_destroyed(&self) -> bool {
        self.listener.is_none()
    }
}

#[wasm_bindgen]
impl RulerSlider {
    #[wasm_bindgen(constructor)]
    pub fn new(
        container_id: &str,
        element_id: &str,
        pixel_width: f64,
        min_mm: f64,
        max_mm: f64,
        start_mm: f64,
    ) -> Result<RulerSlider, JsValue> {
        Self::build(container_id, element_id, pixel_width, min_mm, max_mm, start_mm).map_err(|e| {
            crate::wasm_error!("{}", e);
            JsValue::from_str(&e.to_string())
        })
    }

    /// Current handle position in millimetres
    pub fn value(&self) -> f64 {
        self.input.value_as_number()
    }

    /// Move the handle; the value is clamped into the slider range
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&self, value_mm: f64) {
        if self.is_destroyed() {
            return;
        }
        self.input.set_value_as_number(self.range.clamp(value_mm));
        self.readout.render(&self.range, self.value());
    }

    /// Rows as drawn, for callers that render elsewhere
    #[wasm_bindgen(js_name = displayList)]
    pub fn display_list_js(&self) -> Result<JsValue, JsValue> {
        crate::api::helpers::serialize(&self.display_list, "Failed to serialize display list")
    }

    /// Detach the listener and remove the slider from the page
    pub fn destroy(&mut self) {
        if let Some(listener) = self.listener.take() {
            if let Err(e) = self
                .input
                .remove_event_listener_with_callback("input", listener.as_ref().unchecked_ref())
            {
                log::warn!("failed to detach ruler listener: {:?}", e);
            }
            self.root.remove();
        }
    }
}

impl Drop for RulerSlider {
    fn drop(&mut self) {
        // The listener closure is freed with the slider
        self.destroy();
    }
}
