/// Browser file output for the export flow

use crate::export::{Downloader, ExportError, FolderWriter};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

// Import JS bridge functions
#[wasm_bindgen(module = "/storefront.js")]
extern "C" {
    fn hasDirectoryPicker() -> bool;

    #[wasm_bindgen(catch)]
    async fn writeToPickedDirectory(file_name: &str, contents: &str) -> Result<(), JsValue>;
}

/// `window.showDirectoryPicker()`; asks the user for a folder on each write
pub struct PickedFolder;

impl PickedFolder {
    /// `None` when the browser has no directory picker
    pub fn detect() -> Option<PickedFolder> {
        hasDirectoryPicker().then_some(PickedFolder)
    }
}

impl FolderWriter for PickedFolder {
    async fn write_file(&self, file_name: &str, contents: &str) -> Result<(), ExportError> {
        writeToPickedDirectory(file_name, contents)
            .await
            .map_err(|e| ExportError::Folder(format!("{:?}", e)))
    }
}

/// Downloads through a temporary `<a download>` pointing at a blob URL
pub struct BlobDownloader;

impl Downloader for BlobDownloader {
    fn download(&self, file_name: &str, contents: &str) -> Result<(), ExportError> {
        let fail = |e: JsValue| ExportError::Download(format!("{:?}", e));

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ExportError::Download("no document".to_string()))?;
        let body = document
            .body()
            .ok_or_else(|| ExportError::Download("no document body".to_string()))?;

        let options = BlobPropertyBag::new();
        options.set_type("text/plain");
        let parts = js_sys::Array::of1(&JsValue::from_str(contents));
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(fail)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(fail)?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(fail)?
            .dyn_into()
            .map_err(|_| ExportError::Download("<a> is not an anchor".to_string()))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);

        body.append_child(&anchor).map_err(fail)?;
        anchor.click();
        anchor.remove();

        Url::revoke_object_url(&url).map_err(fail)
    }
}
