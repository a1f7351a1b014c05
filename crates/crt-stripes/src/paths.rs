//! Color channels and the per-channel segment sequences.

/// One of the three CRT phosphor channels.
///
/// The declaration order is also the drawing order: red stripes are
/// emitted first, then green, then blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in drawing order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of this channel in [`Channel::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// Lowercase channel name, used as the SVG group id.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }

    /// Pure stroke color for this channel.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Channel::Red => (255, 0, 0),
            Channel::Green => (0, 255, 0),
            Channel::Blue => (0, 0, 255),
        }
    }

    /// Stroke color formatted as an SVG `rgb()` value.
    pub fn stroke(self) -> String {
        let (r, g, b) = self.rgb();
        format!("rgb({},{},{})", r, g, b)
    }

    /// Pick this channel's component from an RGB triple.
    #[inline]
    pub fn component(self, rgb: [u8; 3]) -> u8 {
        rgb[self.index()]
    }
}

/// A vertical line segment in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripeSegment {
    pub x: f64,
    pub y_start: f64,
    pub y_end: f64,
}

impl StripeSegment {
    #[inline]
    pub fn new(x: f64, y_start: f64, y_end: f64) -> Self {
        Self { x, y_start, y_end }
    }

    /// Drawn length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.y_end - self.y_start
    }
}

/// Segments for all three channels, each kept in insertion order.
///
/// Insertion order is raster scan order and is preserved through to the
/// serialized document, which keeps output byte-for-byte reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelPaths {
    channels: [Vec<StripeSegment>; 3],
}

impl ChannelPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment to a channel.
    #[inline]
    pub fn push(&mut self, channel: Channel, segment: StripeSegment) {
        self.channels[channel.index()].push(segment);
    }

    /// Mutable access to one channel's sequence, for bulk appends.
    #[inline]
    pub fn channel_mut(&mut self, channel: Channel) -> &mut Vec<StripeSegment> {
        &mut self.channels[channel.index()]
    }

    /// Segments of one channel in insertion order.
    #[inline]
    pub fn segments(&self, channel: Channel) -> &[StripeSegment] {
        &self.channels[channel.index()]
    }

    /// Number of segments in one channel.
    #[inline]
    pub fn len(&self, channel: Channel) -> usize {
        self.channels[channel.index()].len()
    }

    /// Number of segments across all channels.
    pub fn total_len(&self) -> usize {
        self.channels.iter().map(Vec::len).sum()
    }

    /// `true` when no channel holds any segment.
    pub fn is_empty(&self) -> bool {
        self.channels.iter().all(Vec::is_empty)
    }
}
