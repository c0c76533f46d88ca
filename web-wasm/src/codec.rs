//! ブラウザでの画像読み込みとサムネイル生成
//!
//! 読み込みは FileReader、縮小は `<img>` → `<canvas>` → `toDataURL("image/jpeg")`。

use crate::js_message;
use address_navigator_common::image::{thumbnail_dimensions, THUMBNAIL_MIME_TYPE};
use address_navigator_common::{Error, ImageCodec, Result};
use futures::channel::oneshot;
use gloo::file::futures::read_as_data_url;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, File, HtmlCanvasElement, HtmlImageElement};

#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasCodec;

impl ImageCodec for CanvasCodec {
    type Source = File;

    async fn encode_file(&self, file: &File) -> Result<String> {
        let blob = gloo::file::File::from(file.clone());
        read_as_data_url(&blob)
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))
    }

    async fn make_thumbnail(
        &self,
        data_url: &str,
        max_width: u32,
        max_height: u32,
        quality: f32,
    ) -> Result<String> {
        let img = load_image(data_url).await?;
        let (width, height) =
            thumbnail_dimensions(img.natural_width(), img.natural_height(), max_width, max_height);

        let render = |e: JsValue| Error::Render(js_message(&e));
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| Error::Render("no document".into()))?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(render)?
            .dyn_into()
            .map_err(|_| Error::Render("not a canvas element".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(render)?
            .ok_or_else(|| Error::Render("Could not get canvas context".into()))?
            .dyn_into()
            .map_err(|_| Error::Render("Could not get canvas context".into()))?;
        ctx.draw_image_with_html_image_element_and_dw_and_dh(&img, 0.0, 0.0, width as f64, height as f64)
            .map_err(render)?;

        canvas
            .to_data_url_with_type_and_encoder_options(THUMBNAIL_MIME_TYPE, &JsValue::from_f64(quality as f64))
            .map_err(render)
    }
}

/// `<img>` に読み込んで onload / onerror を待つ
async fn load_image(src: &str) -> Result<HtmlImageElement> {
    let img = HtmlImageElement::new().map_err(|e| Error::Decode(js_message(&e)))?;

    let (tx, rx) = oneshot::channel::<bool>();
    let tx = Rc::new(RefCell::new(Some(tx)));
    let notify = move |tx: &Rc<RefCell<Option<oneshot::Sender<bool>>>>, loaded: bool| {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(loaded);
        }
    };

    let on_load = {
        let tx = tx.clone();
        Closure::once(move || notify(&tx, true))
    };
    let on_error = {
        let tx = tx.clone();
        Closure::once(move || notify(&tx, false))
    };
    img.set_onload(Some(on_load.as_ref().unchecked_ref()));
    img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    img.set_src(src);

    let loaded = rx.await.unwrap_or(false);
    img.set_onload(None);
    img.set_onerror(None);
    drop((on_load, on_error));

    if loaded {
        Ok(img)
    } else {
        Err(Error::Decode("image could not be loaded".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const PIXEL_PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    #[wasm_bindgen_test]
    async fn test_thumbnail_is_jpeg() {
        let thumb = CanvasCodec.make_thumbnail(PIXEL_PNG, 400, 400, 0.8).await.unwrap();
        assert!(thumb.starts_with("data:image/jpeg"));
    }

    #[wasm_bindgen_test]
    async fn test_broken_image_is_decode_error() {
        let result = CanvasCodec
            .make_thumbnail("data:image/png;base64,AAAA", 400, 400, 0.8)
            .await;
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
