//! Canvas surface and the particle backgrounds.
//!
//! Two kinds of renderer are mounted: one full-page background on
//! `#warp-background`, and one per section inserted into
//! `.section-content` and `.section-gray` elements. All of them are driven by
//! the shared scheduler.

use super::theme::BodyPalette;
use super::{document, listen, query_all, query_document, window};
use crate::config::FieldConfig;
use crate::error::{FxError, Result};
use crate::particles::{FieldRenderer, GlowMode, Surface};
use crate::scheduler::Scheduler;
use crate::theme::ThemeSignal;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;

const PAGE_CANVAS_ID: &str = "warp-background";
const SECTION_SELECTOR: &str = ".section-content, .section-gray";
const SECTION_BACKGROUND_CLASS: &str = "section-background";

type CanvasRenderer = FieldRenderer<CanvasSurface, BodyPalette>;

/// A 2D canvas context.
pub struct CanvasSurface {
    canvas: web_sys::HtmlCanvasElement,
    ctx: web_sys::CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquires the 2D context of `canvas`.
    pub fn new(canvas: web_sys::HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| FxError::missing("2d canvas context"))?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .map_err(|_| FxError::missing("2d canvas context"))?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn set_size(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn radial_glow(&mut self, cx: f32, cy: f32, radius: f32, inner_color: &str, width: f32, height: f32) {
        let (cx, cy) = (cx as f64, cy as f64);
        let Ok(gradient) = self.ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, radius as f64) else {
            return;
        };
        // An unparsable color throws; the glow is then skipped for this frame.
        if gradient.add_color_stop(0.0, inner_color).is_err()
            || gradient.add_color_stop(1.0, "transparent").is_err()
        {
            return;
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
    }
}

fn window_size() -> Result<(f32, f32)> {
    let window = window()?;
    let dimension = |value: std::result::Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Ok((dimension(window.inner_width()), dimension(window.inner_height())))
}

/// Mounts the full-page background.
pub fn mount_page_background(
    config: &FieldConfig,
    signal: ThemeSignal,
    scheduler: &Rc<RefCell<Scheduler>>,
) -> Result<()> {
    let document = document()?;
    let canvas = super::element_by_id::<web_sys::HtmlCanvasElement>(&document, PAGE_CANVAS_ID)?;
    let surface = CanvasSurface::new(canvas)?;
    let (width, height) = window_size()?;
    let renderer = Rc::new(RefCell::new(FieldRenderer::new(
        surface,
        BodyPalette,
        signal,
        width,
        height,
        config.clone(),
        GlowMode::Always,
    )));

    let window = window()?;
    {
        let renderer = renderer.clone();
        listen(&window, "resize", move |_: web_sys::Event| {
            if let Ok((width, height)) = window_size() {
                renderer.borrow_mut().resize(width, height);
            }
        })?;
    }
    {
        let renderer = renderer.clone();
        listen(&window, "mousemove", move |event: web_sys::MouseEvent| {
            renderer
                .borrow_mut()
                .field_mut()
                .set_pointer(event.client_x() as f32, event.client_y() as f32);
        })?;
    }

    scheduler.borrow_mut().register(renderer);
    Ok(())
}

/// Mounts one background per section that does not already have one.
pub fn mount_section_backgrounds(
    config: &FieldConfig,
    signal: ThemeSignal,
    scheduler: &Rc<RefCell<Scheduler>>,
) -> Result<()> {
    let document = document()?;
    let sections = query_document(&document, SECTION_SELECTOR)?;
    let mut mounted = 0usize;
    for section in sections {
        let Ok(section) = section.dyn_into::<web_sys::HtmlElement>() else {
            continue;
        };
        match query_all(&section, &format!(".{SECTION_BACKGROUND_CLASS} canvas")) {
            Ok(existing) if !existing.is_empty() => continue,
            Ok(_) => {}
            Err(err) => {
                log::warn!("Section background skipped: {err}");
                continue;
            }
        }
        match mount_section(&document, &section, config, signal.clone(), scheduler) {
            Ok(()) => mounted += 1,
            Err(err) => log::warn!("Section background skipped: {err}"),
        }
    }
    log::info!("{mounted} section backgrounds mounted");
    Ok(())
}

fn mount_section(
    document: &web_sys::Document,
    section: &web_sys::HtmlElement,
    config: &FieldConfig,
    signal: ThemeSignal,
    scheduler: &Rc<RefCell<Scheduler>>,
) -> Result<()> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| FxError::missing("canvas element"))?;
    let container = document.create_element("div")?;
    container.set_class_name(SECTION_BACKGROUND_CLASS);
    container.append_child(&canvas)?;
    section.insert_before(&container, section.first_child().as_ref())?;

    let surface = CanvasSurface::new(canvas)?;
    let renderer: Rc<RefCell<CanvasRenderer>> = Rc::new(RefCell::new(FieldRenderer::new(
        surface,
        BodyPalette,
        signal,
        section.offset_width() as f32,
        section.offset_height() as f32,
        config.clone(),
        GlowMode::WhileHovered,
    )));

    let window = window()?;
    {
        let renderer = renderer.clone();
        let section = section.clone();
        listen(&window, "resize", move |_: web_sys::Event| {
            renderer
                .borrow_mut()
                .resize(section.offset_width() as f32, section.offset_height() as f32);
        })?;
    }
    {
        let renderer = renderer.clone();
        let target = section.clone();
        listen(section, "mousemove", move |event: web_sys::MouseEvent| {
            let rect = target.get_bounding_client_rect();
            renderer.borrow_mut().field_mut().set_pointer(
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            );
        })?;
    }
    {
        let renderer = renderer.clone();
        listen(section, "mouseleave", move |_: web_sys::MouseEvent| {
            renderer.borrow_mut().field_mut().clear_pointer();
        })?;
    }

    scheduler.borrow_mut().register(renderer);
    Ok(())
}
