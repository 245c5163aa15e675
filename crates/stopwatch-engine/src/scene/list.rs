use super::{DrawCmd, SortKey, ZIndex};

/// A recorded command with its paint-order key.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Draw stream for one frame.
///
/// Cleared and refilled every frame; capacity is kept across frames.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
    sorted: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.sorted.clear();
        self.next_order = 0;
        self.sorted_dirty = false;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let key = SortKey::new(z, self.next_order);
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { key, cmd });
        self.sorted_dirty = true;
    }

    /// Items back-to-front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.sorted.clear();
            self.sorted.extend(0..self.items.len());
            let items = &self.items;
            self.sorted.sort_by_key(|&i| items[i].key);
            self.sorted_dirty = false;
        }
        self.sorted.iter().map(|&i| &self.items[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;
    use crate::scene::shapes::rounded_rect::RoundedRectCmd;

    fn boxed(x: f32) -> DrawCmd {
        DrawCmd::RoundedRect(RoundedRectCmd::new(
            Rect::new(x, 0.0, 1.0, 1.0),
            0.0,
            Color::WHITE,
            None,
        ))
    }

    fn xs(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::RoundedRect(r) => r.rect.origin.x,
                DrawCmd::Text(t) => t.origin.x,
            })
            .collect()
    }

    #[test]
    fn equal_z_keeps_insertion_order() {
        let mut l = DrawList::new();
        for x in [3.0, 1.0, 2.0] {
            l.push(ZIndex(0), boxed(x));
        }
        assert_eq!(xs(&mut l), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn lower_z_paints_first() {
        let mut l = DrawList::new();
        l.push(ZIndex(5), boxed(1.0));
        l.push(ZIndex(-1), boxed(2.0));
        l.push(ZIndex(5), boxed(3.0));
        l.push(ZIndex(0), boxed(4.0));
        assert_eq!(xs(&mut l), vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut l = DrawList::new();
        l.push(ZIndex(0), boxed(1.0));
        l.clear();
        assert!(l.is_empty());
        assert_eq!(xs(&mut l), Vec::<f32>::new());

        l.push_text(ZIndex(0), "x", crate::text::FontId::default(), 12.0, Color::WHITE, Vec2::new(7.0, 0.0));
        assert_eq!(l.len(), 1);
        assert_eq!(l.items()[0].key.order, 0);
        assert_eq!(xs(&mut l), vec![7.0]);
    }
}
