use crate::WindowError;

/// The scroll container's geometry: how far it is scrolled and how tall it is.
///
/// Only scroll and resize events from the owning UI element should change this.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub scroll_top: u64,
    pub container_height: u32,
}

impl Viewport {
    pub const fn new(scroll_top: u64, container_height: u32) -> Self {
        Self {
            scroll_top,
            container_height,
        }
    }

    /// Builds a viewport from raw host pixel values (e.g. a DOM `scrollTop`/`clientHeight`).
    ///
    /// A negative or non-finite `scroll_top` is rejected. A negative or non-finite
    /// `container_height` is treated as an empty viewport. Fractional scroll positions round
    /// down and fractional heights round up, so a partially visible pixel row still counts.
    pub fn from_pixels(scroll_top: f64, container_height: f64) -> Result<Self, WindowError> {
        if !scroll_top.is_finite() || scroll_top < 0.0 {
            wwarn!(scroll_top, "Viewport::from_pixels: rejected scroll position");
            return Err(WindowError::InvalidScrollTop(scroll_top));
        }
        let container_height = if container_height.is_finite() && container_height > 0.0 {
            let whole = ceil_to_u64(container_height);
            u32::try_from(whole).unwrap_or(u32::MAX)
        } else {
            0
        };
        // `as` saturates and truncates toward zero, which is floor for non-negative input.
        Ok(Self::new(scroll_top as u64, container_height))
    }

    /// The first pixel below the viewport.
    pub fn bottom(&self) -> u64 {
        self.scroll_top.saturating_add(self.container_height as u64)
    }

    pub fn with_scroll_top(self, scroll_top: u64) -> Self {
        Self { scroll_top, ..self }
    }

    pub fn with_container_height(self, container_height: u32) -> Self {
        Self {
            container_height,
            ..self
        }
    }
}

pub(crate) fn ceil_to_u64(v: f64) -> u64 {
    let whole = v as u64;
    if (whole as f64) < v {
        whole.saturating_add(1)
    } else {
        whole
    }
}
