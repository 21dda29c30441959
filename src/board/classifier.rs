//! Video vs. static classification of creative deliverables.
//!
//! Most templates carry no explicit category, so the display name decides:
//! any of [`VIDEO_KEYWORDS`] in the lower-cased name means video. The match is
//! deliberately naive ("Storyboard Motion Graphics" counts as video).

use crate::domain::creative::{CreativeCategory, TemplateCatalog};
use crate::domain::work_entry::CreativeItem;

pub const VIDEO_KEYWORDS: [&str; 4] = ["video", "reel", "short", "motion"];

/// Classifies by display name alone.
pub fn classify_name(name: &str) -> CreativeCategory {
    let name = name.to_lowercase();
    if VIDEO_KEYWORDS.iter().any(|keyword| name.contains(keyword)) {
        CreativeCategory::Video
    } else {
        CreativeCategory::Static
    }
}

/// Classifies a produced item. The catalog's explicit category wins over the
/// item's name.
pub fn classify_item(item: &CreativeItem, catalog: &TemplateCatalog) -> CreativeCategory {
    catalog
        .get(item.template_id)
        .and_then(|template| template.category)
        .unwrap_or_else(|| classify_name(&item.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::creative::CreativeTemplate;
    use crate::domain::types::CreativeTemplateId;

    #[test]
    fn name_keywords_mean_video() {
        assert_eq!(classify_name("Instagram Reel Package"), CreativeCategory::Video);
        assert_eq!(classify_name("YouTube SHORTS"), CreativeCategory::Video);
        assert_eq!(classify_name("Promo Video"), CreativeCategory::Video);
        assert_eq!(
            classify_name("Storyboard Motion Graphics"),
            CreativeCategory::Video
        );
        assert_eq!(classify_name("Static Banner Set"), CreativeCategory::Static);
        assert_eq!(classify_name(""), CreativeCategory::Static);
    }

    #[test]
    fn explicit_category_wins_over_name() {
        let id = CreativeTemplateId::new(1).unwrap();
        let template = CreativeTemplate {
            id,
            name: "Motion Poster".into(),
            description: String::new(),
            active: true,
            category: Some(CreativeCategory::Static),
        };
        let catalog = TemplateCatalog::new(vec![template]);
        let item = CreativeItem {
            template_id: id,
            name: "Motion Poster".into(),
            quantity: 1,
        };
        assert_eq!(classify_item(&item, &catalog), CreativeCategory::Static);

        let orphan = CreativeItem {
            template_id: CreativeTemplateId::new(2).unwrap(),
            name: "Reel".into(),
            quantity: 1,
        };
        assert_eq!(classify_item(&orphan, &catalog), CreativeCategory::Video);
    }
}
