use crate::anchor::{Anchor, Anchors};
use crate::settings::FramePolicy;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One entry of `faces-config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceRecord {
    pub id: String,
    pub name: String,
    pub image: String,
    pub width: u32,
    pub height: u32,
    pub body_bottom: u32,
    pub left_anchor: Anchor,
    pub right_anchor: Anchor,
    #[serde(rename = "targetFrame")]
    pub target_frame: Rect,
    pub alignment_offset: u32,
}

impl FaceRecord {
    fn new(
        id: String,
        name: String,
        image: String,
        (width, height): (u32, u32),
        anchors: Anchors,
        target_frame: Rect,
    ) -> Self {
        Self {
            id,
            name,
            image,
            width,
            height,
            body_bottom: anchors.body_bottom,
            left_anchor: anchors.left,
            right_anchor: anchors.right,
            target_frame,
            alignment_offset: 0,
        }
    }

    /// `W x H, bottom_y=.., anchors=(lx,ly)-(rx,ry)` progress text.
    pub fn summary(&self) -> String {
        format!(
            "{}x{}, bottom_y={}, anchors=({},{})-({},{})",
            self.width,
            self.height,
            self.body_bottom,
            self.left_anchor.x(),
            self.left_anchor.y(),
            self.right_anchor.x(),
            self.right_anchor.y()
        )
    }
}

/// Proportional face region for an image of `width` x `height`, truncated.
pub fn estimate_target_frame(width: u32, height: u32, policy: &FramePolicy) -> Rect {
    let scale = |v: u32, ratio: f64| (v as f64 * ratio) as u32;
    Rect {
        x: scale(width, policy.x_ratio),
        y: scale(height, policy.y_ratio),
        width: scale(width, policy.width_ratio),
        height: scale(height, policy.height_ratio),
    }
}

/// Record for the blank reference face; its frame is the fixed calibration.
pub fn blank_record(
    image: impl Into<String>,
    dimensions: (u32, u32),
    anchors: Anchors,
    policy: &FramePolicy,
) -> FaceRecord {
    FaceRecord::new(
        "blank".to_string(),
        "Blank Face".to_string(),
        image.into(),
        dimensions,
        anchors,
        policy.blank_frame,
    )
}

/// Record for `facecam-<suffix>.png`.
pub fn face_record(
    suffix: &str,
    image: impl Into<String>,
    dimensions: (u32, u32),
    anchors: Anchors,
    policy: &FramePolicy,
) -> FaceRecord {
    let (width, height) = dimensions;
    FaceRecord::new(
        format!("face-{suffix}"),
        format!("Face {suffix}"),
        image.into(),
        dimensions,
        anchors,
        estimate_target_frame(width, height, policy),
    )
}
