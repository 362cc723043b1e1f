//! Per-axis draw planning for scroll layers.
//!
//! A layer draw is the product of two independent axis plans. Each plan
//! splits the destination length into runs of layer content (with the
//! content coordinate they start at) and runs of edge fill. Crossing the
//! X and Y content runs gives the blits; the fill runs give solid rects.
//!
//! All values are integer pixels in content space, i.e. after the layer's
//! scale factor has been applied.

/// Which side of the content an edge fill run lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Left (X axis) or top (Y axis)
    Leading,
    /// Right (X axis) or bottom (Y axis)
    Trailing,
}

/// `len` destination pixels starting at `dst`, showing content from `src`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSpan {
    pub src: i64,
    pub dst: i64,
    pub len: i64,
}

/// `len` destination pixels starting at `dst`, filled with an edge color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillSpan {
    pub dst: i64,
    pub len: i64,
    pub edge: Edge,
}

/// Result of planning one axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisPlan {
    /// Content offset actually used (wrapped or clamped)
    pub offset: i64,
    /// True when the content is at least as long as the destination
    pub covers: bool,
    pub content: Vec<ContentSpan>,
    pub fills: Vec<FillSpan>,
}

impl AxisPlan {
    /// Destination range `[start, end)` occupied by content runs
    pub fn content_range(&self) -> (i64, i64) {
        match (self.content.first(), self.content.last()) {
            (Some(first), Some(last)) => (first.dst, last.dst + last.len),
            _ => (0, 0),
        }
    }
}

/// Plan one axis.
///
/// * `content` - content length along the axis (> 0)
/// * `dest` - destination length along the axis (> 0)
/// * `offset` - requested content offset (already floored)
/// * `wrap` - whether the layer wraps on this axis
///
/// Wrapping axes start at `offset mod content` and repeat the content until
/// the destination is covered: two runs when the content covers the
/// destination (the wrap-around split), more when it has to be tiled.
/// Bounded axes clamp the offset into `[0, content - dest]`; content
/// shorter than the destination is drawn once, centred, with edge fill on
/// both sides.
pub fn plan_axis(content: i64, dest: i64, offset: f32, wrap: bool) -> AxisPlan {
    debug_assert!(content > 0 && dest > 0, "plan_axis: content {} dest {}", content, dest);
    let requested = offset.floor() as i64;
    let covers = content >= dest;

    if wrap {
        let start = requested.rem_euclid(content);
        let mut spans = Vec::new();
        let mut src = start;
        let mut dst = 0;
        while dst < dest {
            let len = (content - src).min(dest - dst);
            spans.push(ContentSpan { src, dst, len });
            dst += len;
            src = 0;
        }
        return AxisPlan { offset: start, covers, content: spans, fills: Vec::new() };
    }

    if covers {
        let start = requested.clamp(0, content - dest);
        return AxisPlan {
            offset: start,
            covers,
            content: vec![ContentSpan { src: start, dst: 0, len: dest }],
            fills: Vec::new(),
        };
    }

    let lead = (dest - content) / 2;
    let trail = dest - content - lead;
    let mut fills = Vec::new();
    if lead > 0 {
        fills.push(FillSpan { dst: 0, len: lead, edge: Edge::Leading });
    }
    if trail > 0 {
        fills.push(FillSpan { dst: lead + content, len: trail, edge: Edge::Trailing });
    }
    AxisPlan {
        offset: 0,
        covers,
        content: vec![ContentSpan { src: 0, dst: lead, len: content }],
        fills,
    }
}

#[cfg(test)]
#[path = "draw_plan_tests.rs"]
mod tests;
