use crate::record::FaceRecord;

/// Align every record to the lowest body bottom in the set.
///
/// Returns the baseline row, or `None` (and touches nothing) when `records`
/// is empty.
pub fn normalize(records: &mut [FaceRecord]) -> Option<u32> {
    let max_bottom = records.iter().map(|r| r.body_bottom).max()?;
    for record in records.iter_mut() {
        record.alignment_offset = max_bottom - record.body_bottom;
    }
    Some(max_bottom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{Anchor, Anchors};
    use crate::record::face_record;
    use crate::settings::FramePolicy;

    fn record(id: &str, body_bottom: u32) -> FaceRecord {
        let anchors = Anchors {
            left: Anchor(0, body_bottom),
            right: Anchor(99, body_bottom),
            body_bottom,
        };
        face_record(id, id, (100, 200), anchors, &FramePolicy::default())
    }

    #[test]
    fn empty_input_is_untouched() {
        let mut records: Vec<FaceRecord> = Vec::new();
        assert_eq!(normalize(&mut records), None);
        assert!(records.is_empty());
    }

    #[test]
    fn offsets_are_distance_to_lowest_bottom() {
        let mut records = vec![record("1", 190), record("2", 150), record("3", 199)];
        assert_eq!(normalize(&mut records), Some(199));

        let offsets: Vec<u32> = records.iter().map(|r| r.alignment_offset).collect();
        assert_eq!(offsets, vec![9, 49, 0]);
        assert_eq!(offsets.iter().min(), Some(&0));
    }

    #[test]
    fn ties_share_zero_offset() {
        let mut records = vec![record("1", 120), record("2", 120), record("3", 100)];
        normalize(&mut records);
        let zeros = records.iter().filter(|r| r.alignment_offset == 0).count();
        assert_eq!(zeros, 2);
    }
}
