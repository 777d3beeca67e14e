//! Managed-region marker location.

use crate::config::MarkerConfig;

use super::types::Region;

/// Find the managed region delimited by the literal begin/end markers.
///
/// The first occurrence of each marker wins. Returns `None` when either
/// marker is missing or the end marker occurs at or before the begin
/// marker. `start` is the byte immediately after the begin marker; `end`
/// is the first byte of the end marker.
///
/// A pure function of the text. Callers re-locate on every write so the
/// offsets can never go stale across patches.
pub fn locate_region(text: &str, markers: &MarkerConfig) -> Option<Region> {
    let begin_at = text.find(&markers.begin)?;
    let end_at = text.find(&markers.end)?;
    let start = begin_at + markers.begin.len();
    if end_at < start {
        return None;
    }
    Some(Region { start, end: end_at })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> MarkerConfig {
        MarkerConfig::default()
    }

    #[test]
    fn locates_region_between_markers() {
        let text = "# Hub\n<!-- BEGIN AUTO -->\n- [[a]]\n<!-- END AUTO -->\n";
        let region = locate_region(text, &markers()).unwrap();
        assert_eq!(&text[region.start..region.end], "\n- [[a]]\n");
    }

    #[test]
    fn empty_region() {
        let text = "<!-- BEGIN AUTO --><!-- END AUTO -->";
        let region = locate_region(text, &markers()).unwrap();
        assert_eq!(region.start, region.end);
    }

    #[test]
    fn missing_markers_are_absent() {
        assert!(locate_region("no markers here", &markers()).is_none());
        assert!(locate_region("<!-- BEGIN AUTO -->only begin", &markers()).is_none());
        assert!(locate_region("only end<!-- END AUTO -->", &markers()).is_none());
    }

    #[test]
    fn out_of_order_markers_are_absent() {
        let text = "<!-- END AUTO -->\n<!-- BEGIN AUTO -->\n";
        assert!(locate_region(text, &markers()).is_none());
    }

    #[test]
    fn first_occurrence_of_each_wins() {
        let text = "<!-- BEGIN AUTO -->a<!-- END AUTO -->b<!-- END AUTO -->";
        let region = locate_region(text, &markers()).unwrap();
        assert_eq!(&text[region.start..region.end], "a");
    }
}
