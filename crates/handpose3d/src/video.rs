//! Video frame sources.

use std::sync::Arc;

use anyhow::bail;

use crate::resolution::Resolution;

/// A captured video frame.
///
/// The pixel data is opaque to this crate and only interpreted by the
/// [`HandModel`][crate::model::HandModel].
#[derive(Debug, Clone)]
pub struct Frame {
    index: u64,
    resolution: Resolution,
    data: Arc<[u8]>,
}

impl Frame {
    pub fn new(index: u64, resolution: Resolution, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            index,
            resolution,
            data: data.into(),
        }
    }

    /// Returns the sequence number of this frame within its source.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A continuously updating source of video frames, such as a webcam.
///
/// Sources are expected to be fully set up when they are constructed. Failure to access the
/// capture device should be reported from the constructor, before any frame loop is started.
pub trait FrameSource {
    /// Returns the resolution of the frames this source delivers.
    fn resolution(&self) -> Resolution;

    /// Reads the next frame, blocking until it is available.
    ///
    /// Returns `Ok(None)` when the source has ended.
    fn read(&mut self) -> anyhow::Result<Option<Frame>>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn resolution(&self) -> Resolution {
        (**self).resolution()
    }

    fn read(&mut self) -> anyhow::Result<Option<Frame>> {
        (**self).read()
    }
}

/// A [`FrameSource`] producing black RGB frames.
///
/// Useful for driving models that synthesize their predictions without looking at the image.
pub struct BlankSource {
    resolution: Resolution,
    data: Arc<[u8]>,
    next_index: u64,
    limit: Option<u64>,
}

impl BlankSource {
    /// Opens a source delivering frames of `resolution`.
    ///
    /// If `limit` is set, the source ends after that many frames.
    pub fn open(resolution: Resolution, limit: Option<u64>) -> anyhow::Result<Self> {
        if resolution.is_empty() {
            bail!("cannot capture frames with resolution {resolution}");
        }
        let len = usize::try_from(resolution.num_pixels() * 3)?;
        log::debug!("opened blank {resolution} frame source (limit: {limit:?})");
        Ok(Self {
            resolution,
            data: vec![0u8; len].into(),
            next_index: 0,
            limit,
        })
    }
}

impl FrameSource for BlankSource {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn read(&mut self) -> anyhow::Result<Option<Frame>> {
        if self.limit.map_or(false, |limit| self.next_index >= limit) {
            return Ok(None);
        }

        let frame = Frame {
            index: self.next_index,
            resolution: self.resolution,
            data: self.data.clone(),
        };
        self.next_index += 1;
        Ok(Some(frame))
    }
}
