//! Editor-scoped list of picked creative templates.

use serde::{Deserialize, Serialize};

use crate::domain::types::CreativeTemplateId;
use crate::domain::work_entry::CreativeItem;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedCreativeItem {
    pub template_id: CreativeTemplateId,
    pub quantity: u32,
}

/// Ordered selection holding at most one item per template, each with a
/// positive quantity.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct CreativeSelection {
    items: Vec<SelectedCreativeItem>,
}

impl CreativeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a selection from decoded items. Repeated templates are merged
    /// and zero quantities dropped.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a CreativeItem>) -> Self {
        let mut selection = Self::new();
        for item in items {
            selection.add_quantity(item.template_id, item.quantity);
        }
        selection
    }

    /// Picks one more unit of the template.
    pub fn add(&mut self, template_id: CreativeTemplateId) {
        self.add_quantity(template_id, 1);
    }

    fn add_quantity(&mut self, template_id: CreativeTemplateId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.position(template_id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(quantity);
            }
            None => self.items.push(SelectedCreativeItem {
                template_id,
                quantity,
            }),
        }
    }

    /// Sets the quantity for a template; zero removes it.
    pub fn set_quantity(&mut self, template_id: CreativeTemplateId, quantity: u32) {
        if quantity == 0 {
            self.remove(template_id);
            return;
        }
        match self.position(template_id) {
            Some(index) => self.items[index].quantity = quantity,
            None => self.items.push(SelectedCreativeItem {
                template_id,
                quantity,
            }),
        }
    }

    pub fn remove(&mut self, template_id: CreativeTemplateId) {
        self.items.retain(|item| item.template_id != template_id);
    }

    pub fn quantity_of(&self, template_id: CreativeTemplateId) -> u32 {
        self.position(template_id)
            .map(|index| self.items[index].quantity)
            .unwrap_or(0)
    }

    pub fn items(&self) -> &[SelectedCreativeItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, template_id: CreativeTemplateId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.template_id == template_id)
    }
}
