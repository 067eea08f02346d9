//! Image navigation for the listing preview dialog.
//!
//! A [`Gallery`] is built from one listing when the dialog opens. Its image
//! list is the thumbnail followed by the screenshots, with blanks and repeats
//! dropped (first occurrence wins):
//!
//! ```text
//! thumbnail   = "a.png"
//! screenshots = ["a.png", "b.png", "", "b.png", "c.png"]
//! images      = ["a.png", "b.png", "c.png"]
//! ```
//!
//! The cursor starts at 0, steps with wraparound, and only accepts jumps to
//! an existing index. With zero or one image there is nothing to navigate and
//! every step is a no-op.
//!
//! [`PreviewDialog`] owns at most one gallery and rebuilds it whenever a
//! different listing is shown, so the cursor never carries over between
//! listings.

use crate::types::Listing;

/// Navigable, deduplicated image list of one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<String>,
    active: usize,
}

impl Gallery {
    pub fn open(listing: &Listing) -> Self {
        let candidates = listing
            .thumbnail
            .iter()
            .chain(listing.screenshots.iter().flatten());

        let mut images: Vec<String> = Vec::new();
        for url in candidates {
            if url.is_empty() || images.contains(url) {
                continue;
            }
            images.push(url.clone());
        }
        tracing::debug!(listing = %listing.id, images = images.len(), "opened gallery");
        Self { images, active: 0 }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// URL under the cursor, `None` for an empty gallery.
    pub fn active_image(&self) -> Option<&str> {
        self.images.get(self.active).map(String::as_str)
    }

    /// Whether prev/next arrows and the thumbnail strip are shown.
    pub fn has_controls(&self) -> bool {
        self.images.len() > 1
    }

    pub fn next(&mut self) {
        if self.has_controls() {
            self.active = (self.active + 1) % self.images.len();
        }
    }

    pub fn prev(&mut self) {
        if self.has_controls() {
            let n = self.images.len();
            self.active = (self.active + n - 1) % n;
        }
    }

    /// Move the cursor straight to `index`. Returns `false` and leaves the
    /// cursor alone when `index` is out of range.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            tracing::debug!(index, len = self.images.len(), "ignored out-of-range jump");
            return false;
        }
        self.active = index;
        true
    }

    /// Discard the gallery.
    pub fn close(self) {}
}

/// The preview dialog: either closed, or showing one listing with its gallery.
#[derive(Debug, Default)]
pub struct PreviewDialog<'a> {
    shown: Option<(&'a Listing, Gallery)>,
}

impl<'a> PreviewDialog<'a> {
    pub fn new() -> Self {
        Self { shown: None }
    }

    /// Show `listing`. The gallery is rebuilt (cursor back to 0) unless the
    /// same listing is already on screen.
    pub fn show(&mut self, listing: &'a Listing) {
        let same = self
            .shown
            .as_ref()
            .is_some_and(|(current, _)| current.id == listing.id);
        if same {
            return;
        }
        self.shown = Some((listing, Gallery::open(listing)));
    }

    pub fn close(&mut self) {
        if let Some((_, gallery)) = self.shown.take() {
            gallery.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.shown.is_some()
    }

    pub fn listing(&self) -> Option<&'a Listing> {
        self.shown.as_ref().map(|(listing, _)| *listing)
    }

    pub fn gallery(&self) -> Option<&Gallery> {
        self.shown.as_ref().map(|(_, gallery)| gallery)
    }

    pub fn gallery_mut(&mut self) -> Option<&mut Gallery> {
        self.shown.as_mut().map(|(_, gallery)| gallery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn with_images(id: &str, thumbnail: Option<&str>, screenshots: &[&str]) -> Listing {
        Listing {
            thumbnail: thumbnail.map(str::to_string),
            screenshots: Some(screenshots.iter().map(|s| s.to_string()).collect()),
            ..listing(id, "Framer", id)
        }
    }

    fn three_images() -> Gallery {
        Gallery::open(&with_images(
            "t",
            Some("a.png"),
            &["a.png", "b.png", "b.png", "c.png"],
        ))
    }

    #[test]
    fn open_dedups_in_first_seen_order() {
        let gallery = three_images();
        assert_eq!(gallery.images(), ["a.png", "b.png", "c.png"]);
        assert_eq!(gallery.active_index(), 0);
        assert_eq!(gallery.active_image(), Some("a.png"));
    }

    #[test]
    fn open_skips_empty_values() {
        let gallery = Gallery::open(&with_images("t", Some(""), &["", "x.png", ""]));
        assert_eq!(gallery.images(), ["x.png"]);
    }

    #[test]
    fn open_without_thumbnail_uses_screenshots() {
        let gallery = Gallery::open(&with_images("t", None, &["x.png", "y.png"]));
        assert_eq!(gallery.images(), ["x.png", "y.png"]);
    }

    #[test]
    fn open_without_any_media_is_empty() {
        let gallery = Gallery::open(&listing("t", "Framer", "T"));
        assert!(gallery.is_empty());
        assert!(!gallery.has_controls());
        assert_eq!(gallery.active_image(), None);
    }

    #[test]
    fn next_wraps_around() {
        let mut gallery = three_images();
        gallery.next();
        gallery.next();
        assert_eq!(gallery.active_index(), 2);
        gallery.next();
        assert_eq!(gallery.active_index(), 0);
    }

    #[test]
    fn prev_from_zero_wraps_to_last() {
        let mut gallery = three_images();
        gallery.prev();
        assert_eq!(gallery.active_index(), 2);
        assert_eq!(gallery.active_image(), Some("c.png"));
    }

    #[test]
    fn steps_are_no_ops_for_single_or_empty_galleries() {
        let mut single = Gallery::open(&with_images("t", Some("a.png"), &["a.png"]));
        single.next();
        single.prev();
        assert_eq!(single.active_index(), 0);

        let mut empty = Gallery::open(&listing("t", "Framer", "T"));
        empty.next();
        empty.prev();
        assert_eq!(empty.active_index(), 0);
    }

    #[test]
    fn jump_within_range() {
        let mut gallery = three_images();
        assert!(gallery.jump_to(1));
        assert_eq!(gallery.active_image(), Some("b.png"));
    }

    #[test]
    fn jump_out_of_range_is_rejected() {
        let mut gallery = three_images();
        gallery.next();
        assert!(!gallery.jump_to(5));
        assert!(!gallery.jump_to(3));
        assert_eq!(gallery.active_index(), 1);
    }

    #[test]
    fn jump_on_empty_gallery_is_rejected() {
        let mut gallery = Gallery::open(&listing("t", "Framer", "T"));
        assert!(!gallery.jump_to(0));
    }

    // =========================================================================
    // PreviewDialog
    // =========================================================================

    #[test]
    fn dialog_starts_closed() {
        let dialog = PreviewDialog::new();
        assert!(!dialog.is_open());
        assert!(dialog.gallery().is_none());
    }

    #[test]
    fn showing_a_different_listing_resets_cursor() {
        let a = with_images("a", Some("1.png"), &["2.png", "3.png"]);
        let b = with_images("b", Some("4.png"), &["5.png"]);
        let mut dialog = PreviewDialog::new();

        dialog.show(&a);
        dialog.gallery_mut().unwrap().jump_to(2);
        dialog.show(&b);
        assert_eq!(dialog.listing().unwrap().id, "b");
        assert_eq!(dialog.gallery().unwrap().active_index(), 0);
        assert_eq!(dialog.gallery().unwrap().images(), ["4.png", "5.png"]);
    }

    #[test]
    fn reshowing_the_same_listing_keeps_cursor() {
        let a = with_images("a", Some("1.png"), &["2.png", "3.png"]);
        let mut dialog = PreviewDialog::new();
        dialog.show(&a);
        dialog.gallery_mut().unwrap().next();
        dialog.show(&a);
        assert_eq!(dialog.gallery().unwrap().active_index(), 1);
    }

    #[test]
    fn close_then_show_starts_fresh() {
        let a = with_images("a", Some("1.png"), &["2.png"]);
        let mut dialog = PreviewDialog::new();
        dialog.show(&a);
        dialog.gallery_mut().unwrap().next();
        dialog.close();
        assert!(!dialog.is_open());
        dialog.show(&a);
        assert_eq!(dialog.gallery().unwrap().active_index(), 0);
    }
}
