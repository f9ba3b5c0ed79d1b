/// Cart summary export: write into a user-picked folder, else download

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    #[error("folder write failed: {0}")]
    Folder(String),
    #[error("download failed: {0}")]
    Download(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    SavedToFolder,
    Downloaded,
}

/// Primary target: a folder the user grants access to.
/// Creates or overwrites `file_name` inside it.
#[allow(async_fn_in_trait)]
pub trait FolderWriter {
    async fn write_file(&self, file_name: &str, contents: &str) -> Result<(), ExportError>;
}

/// Fallback target: a plain file download
pub trait Downloader {
    fn download(&self, file_name: &str, contents: &str) -> Result<(), ExportError>;
}

/// Try the folder writer when one is available; any failure there
/// (cancelled picker, denied permission, write error) falls through to
/// the download.
pub async fn export_summary<W, D>(
    file_name: &str,
    contents: &str,
    folder: Option<&W>,
    downloader: &D,
) -> Result<ExportOutcome, ExportError>
where
    W: FolderWriter,
    D: Downloader,
{
    if let Some(folder) = folder {
        match folder.write_file(file_name, contents).await {
            Ok(()) => {
                log::info!("Saved {} to picked folder", file_name);
                return Ok(ExportOutcome::SavedToFolder);
            }
            Err(e) => log::error!("{}; falling back to download", e),
        }
    }

    downloader.download(file_name, contents)?;
    log::info!("Downloaded {}", file_name);
    Ok(ExportOutcome::Downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingFolder {
        fail_with: Option<String>,
        written: RefCell<Vec<(String, String)>>,
    }

    impl FolderWriter for RecordingFolder {
        async fn write_file(&self, file_name: &str, contents: &str) -> Result<(), ExportError> {
            if let Some(reason) = &self.fail_with {
                return Err(ExportError::Folder(reason.clone()));
            }
            self.written
                .borrow_mut()
                .push((file_name.to_string(), contents.to_string()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingDownloader {
        downloads: RefCell<Vec<(String, String)>>,
    }

    impl Downloader for RecordingDownloader {
        fn download(&self, file_name: &str, contents: &str) -> Result<(), ExportError> {
            self.downloads
                .borrow_mut()
                .push((file_name.to_string(), contents.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_folder_write_succeeds() {
        let folder = RecordingFolder::default();
        let downloader = RecordingDownloader::default();

        let outcome = block_on(export_summary(
            "cart_summary.txt",
            "A x 1 — 5₴ each",
            Some(&folder),
            &downloader,
        ));

        assert_eq!(outcome, Ok(ExportOutcome::SavedToFolder));
        assert_eq!(
            *folder.written.borrow(),
            vec![("cart_summary.txt".to_string(), "A x 1 — 5₴ each".to_string())]
        );
        assert!(downloader.downloads.borrow().is_empty());
    }

    #[test]
    fn test_folder_failure_falls_back_to_download() {
        let folder = RecordingFolder {
            fail_with: Some("AbortError: The user aborted a request.".to_string()),
            ..RecordingFolder::default()
        };
        let downloader = RecordingDownloader::default();

        let outcome = block_on(export_summary(
            "cart_summary.txt",
            "text",
            Some(&folder),
            &downloader,
        ));

        assert_eq!(outcome, Ok(ExportOutcome::Downloaded));
        assert_eq!(downloader.downloads.borrow().len(), 1);
    }

    #[test]
    fn test_no_picker_downloads_empty_cart_message() {
        let downloader = RecordingDownloader::default();

        let outcome = block_on(export_summary(
            "cart_summary.txt",
            "Кошик порожній",
            None::<&RecordingFolder>,
            &downloader,
        ));

        assert_eq!(outcome, Ok(ExportOutcome::Downloaded));
        assert_eq!(
            *downloader.downloads.borrow(),
            vec![("cart_summary.txt".to_string(), "Кошик порожній".to_string())]
        );
    }

    #[test]
    fn test_download_failure_is_returned() {
        struct BrokenDownloader;

        impl Downloader for BrokenDownloader {
            fn download(&self, _file_name: &str, _contents: &str) -> Result<(), ExportError> {
                Err(ExportError::Download("no document".to_string()))
            }
        }

        let outcome = block_on(export_summary(
            "cart_summary.txt",
            "text",
            None::<&RecordingFolder>,
            &BrokenDownloader,
        ));

        assert_eq!(outcome, Err(ExportError::Download("no document".to_string())));
    }
}
