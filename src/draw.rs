//! Canvas2D output: raster blits for the software path and the ball markers
//! drawn on the overlay canvases for both paths.

use crate::constants::{PLANE_LABEL_FONT, PLANE_LABEL_INSET_PX, PLANE_LABEL_RGB};
use metaball_core::constants::MARKER_DOT_RADIUS_PX;
use metaball_core::slice::Marker;
use metaball_core::Raster;
use wasm_bindgen::Clamped;
use web_sys as web;

/// Copy `raster` onto the canvas behind `ctx`. Empty rasters are skipped.
pub fn blit(ctx: &web::CanvasRenderingContext2d, raster: &Raster) -> anyhow::Result<()> {
    if raster.width() == 0 || raster.height() == 0 {
        return Ok(());
    }
    let image = web::ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(raster.data()),
        raster.width(),
        raster.height(),
    )
    .map_err(|e| anyhow::anyhow!("ImageData: {:?}", e))?;
    ctx.put_image_data(&image, 0.0, 0.0)
        .map_err(|e| anyhow::anyhow!("putImageData: {:?}", e))
}

/// Clear the overlay and draw one outline plus center dot per ball.
pub fn markers(
    ctx: &web::CanvasRenderingContext2d,
    canvas: &web::HtmlCanvasElement,
    label: &str,
    markers: &[Marker],
) {
    let (w, h) = (canvas.width() as f64, canvas.height() as f64);
    ctx.clear_rect(0.0, 0.0, w, h);

    ctx.set_font(PLANE_LABEL_FONT);
    ctx.set_fill_style_str(PLANE_LABEL_RGB);
    _ = ctx.fill_text(
        &label.to_ascii_uppercase(),
        PLANE_LABEL_INSET_PX,
        PLANE_LABEL_INSET_PX * 2.5,
    );

    for m in markers {
        let css = m.style.css();
        let (x, y) = (m.center.x as f64, m.center.y as f64);
        ctx.set_stroke_style_str(&css);
        ctx.set_line_width(m.style.line_width() as f64);
        ctx.begin_path();
        _ = ctx.arc(x, y, m.radius_px as f64, 0.0, std::f64::consts::TAU);
        ctx.stroke();

        ctx.set_fill_style_str(&css);
        ctx.begin_path();
        _ = ctx.arc(x, y, MARKER_DOT_RADIUS_PX as f64, 0.0, std::f64::consts::TAU);
        ctx.fill();
    }
}
