//! Range controls built on [`rangekit_ui`].
//!
//! The crate stays renderer-agnostic: a host feeds it measured lengths and
//! pointer positions and draws whatever the returned geometry describes.
//!
//! - [`range_slider`]: a two-thumb slider controller driving a
//!   [`RangeModel`](rangekit_ui::RangeModel) through its bound track.
//! - [`tick_bar`]: tick positions along the same track.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod range_slider;
pub mod tick_bar;
