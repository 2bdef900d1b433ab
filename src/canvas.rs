//! Replays core display lists on a Canvas2D context.

use crate::dom;
use anyhow::anyhow;
use glam::Vec2;
use slowtide_core::activities::Surface;
use slowtide_core::draw::{Color, DisplayList, DrawCmd, Glow, Paint};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Corner radius of sorting blocks, in CSS pixels.
const BLOCK_CORNER: f64 = 6.0;

pub struct Canvas2d {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    surface: Surface,
    dpr: f64,
}

impl Canvas2d {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow!("{:?}", e))?;
        let (surface, dpr, _) = dom::sync_canvas_backing_size(&canvas);
        Ok(Self {
            canvas,
            ctx,
            surface,
            dpr,
        })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Re-read the CSS size. Returns the surface when the backing store was
    /// resized, which also wipes its pixels.
    pub fn resize(&mut self) -> Option<Surface> {
        let (surface, dpr, cleared) = dom::sync_canvas_backing_size(&self.canvas);
        self.surface = surface;
        self.dpr = dpr;
        cleared.then_some(surface)
    }

    pub fn clear(&self) {
        self.reset_transform();
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.surface.width as f64,
            self.surface.height as f64,
        );
    }

    fn reset_transform(&self) {
        _ = self
            .ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
    }

    pub fn draw(&self, list: &DisplayList) {
        self.reset_transform();
        for cmd in list.iter() {
            self.draw_cmd(cmd);
        }
    }

    fn draw_cmd(&self, cmd: &DrawCmd) {
        let ctx = &self.ctx;
        let (w, h) = (self.surface.width as f64, self.surface.height as f64);
        match cmd {
            DrawCmd::Clear => ctx.clear_rect(0.0, 0.0, w, h),
            DrawCmd::Fade(color) => {
                ctx.set_fill_style(&JsValue::from_str(&color.css()));
                ctx.fill_rect(0.0, 0.0, w, h);
            }
            DrawCmd::FillRect {
                origin,
                size,
                paint,
            } => {
                self.set_fill(paint);
                ctx.fill_rect(
                    origin.x as f64,
                    origin.y as f64,
                    size.x as f64,
                    size.y as f64,
                );
            }
            DrawCmd::FillCircle {
                center,
                radius,
                paint,
                glow,
            } => {
                self.with_glow(glow.as_ref(), || {
                    ctx.begin_path();
                    _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                    self.set_fill(paint);
                    ctx.fill();
                });
            }
            DrawCmd::StrokeCircle {
                center,
                radius,
                color,
                width,
            } => {
                ctx.begin_path();
                _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                self.set_stroke(color, *width);
                ctx.stroke();
            }
            DrawCmd::Line {
                from,
                to,
                color,
                width,
            } => {
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                self.set_stroke(color, *width);
                ctx.stroke();
            }
            DrawCmd::Polygon {
                points,
                paint,
                glow,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    return;
                };
                self.with_glow(glow.as_ref(), || {
                    ctx.begin_path();
                    ctx.move_to(first.x as f64, first.y as f64);
                    for p in rest {
                        ctx.line_to(p.x as f64, p.y as f64);
                    }
                    ctx.close_path();
                    self.set_fill(paint);
                    ctx.fill();
                });
            }
            DrawCmd::Ellipse {
                center,
                radii,
                rotation,
                paint,
            } => {
                ctx.begin_path();
                _ = ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radii.x.max(0.0) as f64,
                    radii.y.max(0.0) as f64,
                    *rotation as f64,
                    0.0,
                    TAU,
                );
                self.set_fill(paint);
                ctx.fill();
            }
            DrawCmd::Curve {
                from,
                control,
                to,
                color,
                width,
            } => {
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.quadratic_curve_to(
                    control.x as f64,
                    control.y as f64,
                    to.x as f64,
                    to.y as f64,
                );
                self.set_stroke(color, *width);
                ctx.stroke();
            }
            DrawCmd::Block {
                center,
                size,
                angle,
                scale,
                color,
                glow,
            } => self.draw_block(*center, *size, *angle, *scale, color, *glow),
        }
    }

    fn draw_block(&self, center: Vec2, size: Vec2, angle: f32, scale: f32, color: &Color, glow: bool) {
        let ctx = &self.ctx;
        ctx.save();
        _ = ctx.translate(center.x as f64, center.y as f64);
        _ = ctx.rotate(angle as f64);
        _ = ctx.scale(scale as f64, scale as f64);
        let (w, h) = (size.x as f64, size.y as f64);

        if glow {
            ctx.set_shadow_blur(20.0);
            ctx.set_shadow_color(&color.css());
        } else {
            ctx.set_shadow_blur(10.0);
            ctx.set_shadow_color("rgba(0,0,0,0.25)");
            ctx.set_shadow_offset_y(4.0);
        }
        self.rounded_rect(-w / 2.0, -h / 2.0, w, h, BLOCK_CORNER);
        ctx.set_fill_style(&JsValue::from_str(&color.css()));
        ctx.fill();

        ctx.set_shadow_blur(0.0);
        ctx.set_shadow_offset_y(0.0);
        ctx.set_fill_style(&JsValue::from_str("rgba(255,255,255,0.3)"));
        self.rounded_rect(-w / 2.0, -h / 2.0, w, h * 0.3, BLOCK_CORNER);
        ctx.fill();
        ctx.restore();
    }

    fn rounded_rect(&self, x: f64, y: f64, w: f64, h: f64, r: f64) {
        let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        _ = ctx.arc_to(x + w, y, x + w, y + h, r);
        _ = ctx.arc_to(x + w, y + h, x, y + h, r);
        _ = ctx.arc_to(x, y + h, x, y, r);
        _ = ctx.arc_to(x, y, x + w, y, r);
        ctx.close_path();
    }

    fn with_glow(&self, glow: Option<&Glow>, draw: impl FnOnce()) {
        match glow {
            Some(g) => {
                self.ctx.save();
                self.ctx.set_shadow_blur(g.blur as f64);
                self.ctx.set_shadow_color(&g.color.css());
                draw();
                self.ctx.restore();
            }
            None => draw(),
        }
    }

    fn set_stroke(&self, color: &Color, width: f32) {
        self.ctx.set_stroke_style(&JsValue::from_str(&color.css()));
        self.ctx.set_line_width(width as f64);
        self.ctx.set_line_cap("round");
    }

    fn set_fill(&self, paint: &Paint) {
        let ctx = &self.ctx;
        match paint {
            Paint::Solid(c) => ctx.set_fill_style(&JsValue::from_str(&c.css())),
            Paint::Linear { from, to, stops } => {
                let g = ctx.create_linear_gradient(
                    from.x as f64,
                    from.y as f64,
                    to.x as f64,
                    to.y as f64,
                );
                for (offset, color) in stops {
                    _ = g.add_color_stop(offset.clamp(0.0, 1.0), &color.css());
                }
                ctx.set_fill_style(&g);
            }
            Paint::Radial {
                center,
                r0,
                r1,
                stops,
            } => {
                let (x, y) = (center.x as f64, center.y as f64);
                match ctx.create_radial_gradient(x, y, *r0 as f64, x, y, r1.max(0.0) as f64) {
                    Ok(g) => {
                        for (offset, color) in stops {
                            _ = g.add_color_stop(offset.clamp(0.0, 1.0), &color.css());
                        }
                        ctx.set_fill_style(&g);
                    }
                    Err(e) => {
                        log::debug!("[canvas] radial gradient failed: {:?}", e);
                        if let Some((_, c)) = stops.first() {
                            ctx.set_fill_style(&JsValue::from_str(&c.css()));
                        }
                    }
                }
            }
        }
    }
}
