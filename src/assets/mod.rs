//! Bitmap resources
//!
//! Bitmaps are requested by path and load in the background using a
//! fire-and-poll pattern that fits macroquad's single-threaded model:
//! - `request` starts a file load and returns an id immediately
//! - `poll` is called once per frame; finished files are decoded and
//!   uploaded, flipping that bitmap to ready exactly once
//! - the renderer asks `is_ready` and skips anything still loading
//!
//! A bitmap that fails to load is logged and stays not-ready forever.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use macroquad::logging::{info, warn};
use macroquad::texture::{FilterMode, Texture2D};

/// Handle to a bitmap in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitmapId(usize);

impl BitmapId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Error type for bitmap loading
#[derive(Debug, Clone, PartialEq)]
pub enum BitmapError {
    /// The file could not be read
    Io(String),
    /// The file was read but is not a supported image
    Decode(String),
}

impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitmapError::Io(msg) => write!(f, "I/O error: {}", msg),
            BitmapError::Decode(msg) => write!(f, "decode error: {}", msg),
        }
    }
}

impl std::error::Error for BitmapError {}

impl From<image::ImageError> for BitmapError {
    fn from(e: image::ImageError) -> Self {
        BitmapError::Decode(e.to_string())
    }
}

/// Load progress of a single bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapState {
    Pending,
    Ready,
    Failed,
}

/// RGBA pixels decoded from an image file
#[derive(Debug, Clone)]
pub struct DecodedBitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode PNG/JPEG/BMP bytes into RGBA8
pub fn decode_bitmap(bytes: &[u8]) -> Result<DecodedBitmap, BitmapError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(BitmapError::Decode(format!(
            "{}x{} exceeds the maximum texture size",
            width, height
        )));
    }
    Ok(DecodedBitmap {
        width,
        height,
        rgba: image.into_raw(),
    })
}

type LoadFuture = Pin<Box<dyn Future<Output = Result<Vec<u8>, BitmapError>>>>;

enum Slot {
    Pending(LoadFuture),
    Ready { texture: Texture2D, width: u32, height: u32 },
    Failed(BitmapError),
}

struct BitmapEntry {
    path: String,
    slot: Slot,
}

/// All bitmaps used by the game, indexed by `BitmapId`
pub struct BitmapStore {
    entries: Vec<BitmapEntry>,
}

impl BitmapStore {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Start loading `path`. Returns immediately.
    pub fn request(&mut self, path: &str) -> BitmapId {
        let owned = path.to_string();
        let load: LoadFuture = Box::pin(async move {
            macroquad::file::load_file(&owned)
                .await
                .map_err(|e| BitmapError::Io(e.to_string()))
        });
        self.push(path, Slot::Pending(load))
    }

    fn push(&mut self, path: &str, slot: Slot) -> BitmapId {
        let id = BitmapId::new(self.entries.len());
        self.entries.push(BitmapEntry {
            path: path.to_string(),
            slot,
        });
        id
    }

    /// Advance every pending load once. Returns how many bitmaps became
    /// ready during this call.
    pub fn poll(&mut self) -> usize {
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());
        let mut finished = 0;

        for entry in &mut self.entries {
            let Slot::Pending(load) = &mut entry.slot else { continue };
            let Poll::Ready(result) = load.as_mut().poll(&mut cx) else { continue };

            match result.and_then(|bytes| decode_bitmap(&bytes)) {
                Ok(decoded) => {
                    let texture = Texture2D::from_rgba8(
                        decoded.width as u16,
                        decoded.height as u16,
                        &decoded.rgba,
                    );
                    texture.set_filter(FilterMode::Nearest);
                    info!("Finished loading image {}", entry.path);
                    entry.slot = Slot::Ready {
                        texture,
                        width: decoded.width,
                        height: decoded.height,
                    };
                    finished += 1;
                }
                Err(e) => {
                    warn!("Failed to load image {}: {}", entry.path, e);
                    entry.slot = Slot::Failed(e);
                }
            }
        }
        finished
    }

    pub fn state(&self, id: BitmapId) -> Option<BitmapState> {
        self.entries.get(id.index()).map(|entry| match entry.slot {
            Slot::Pending(_) => BitmapState::Pending,
            Slot::Ready { .. } => BitmapState::Ready,
            Slot::Failed(_) => BitmapState::Failed,
        })
    }

    pub fn is_ready(&self, id: BitmapId) -> bool {
        self.state(id) == Some(BitmapState::Ready)
    }

    pub fn texture(&self, id: BitmapId) -> Option<&Texture2D> {
        match &self.entries.get(id.index())?.slot {
            Slot::Ready { texture, .. } => Some(texture),
            _ => None,
        }
    }

    /// Pixel size of a ready bitmap
    pub fn natural_size(&self, id: BitmapId) -> Option<(u32, u32)> {
        match &self.entries.get(id.index())?.slot {
            Slot::Ready { width, height, .. } => Some((*width, *height)),
            _ => None,
        }
    }

    pub fn error(&self, id: BitmapId) -> Option<&BitmapError> {
        match &self.entries.get(id.index())?.slot {
            Slot::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn path(&self, id: BitmapId) -> Option<&str> {
        self.entries.get(id.index()).map(|entry| entry.path.as_str())
    }

    /// Number of loads still in flight
    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.slot, Slot::Pending(_)))
            .count()
    }
}

impl Default for BitmapStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 90, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let decoded = decode_bitmap(&png_bytes(3, 2)).unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.rgba.len(), 3 * 2 * 4);
        assert_eq!(&decoded.rgba[0..4], &[200, 40, 90, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_bitmap(b"definitely not an image").unwrap_err();
        assert!(matches!(err, BitmapError::Decode(_)));
    }

    #[test]
    fn test_requests_start_pending() {
        let mut store = BitmapStore::new();
        let a = store.request("images/a.png");
        let b = store.request("images/b.png");

        assert_eq!(a, BitmapId::new(0));
        assert_eq!(b, BitmapId::new(1));
        assert_eq!(store.state(a), Some(BitmapState::Pending));
        assert!(!store.is_ready(b));
        assert_eq!(store.natural_size(a), None);
        assert_eq!(store.path(b), Some("images/b.png"));
        assert_eq!(store.pending_count(), 2);
    }

    #[test]
    fn test_unknown_id() {
        let store = BitmapStore::new();
        assert_eq!(store.state(BitmapId::new(5)), None);
        assert!(!store.is_ready(BitmapId::new(5)));
        assert!(store.texture(BitmapId::new(5)).is_none());
    }

    #[test]
    fn test_failed_slot_reports_error() {
        let mut store = BitmapStore::new();
        let id = store.push("images/missing.png", Slot::Failed(BitmapError::Io("gone".into())));
        assert_eq!(store.state(id), Some(BitmapState::Failed));
        assert_eq!(store.error(id), Some(&BitmapError::Io("gone".into())));
        assert_eq!(store.pending_count(), 0);
    }
}
