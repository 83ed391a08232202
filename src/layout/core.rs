use bitflags::bitflags;

use crate::value::AttrValue;
use crate::widget::OwnerId;

/// Size sentinel: stretch to the parent's extent.
pub const MATCH_PARENT: i32 = -1;
/// Size sentinel: shrink to the content's extent.
pub const WRAP_CONTENT: i32 = -2;

/// Flag value for rules that take no anchor (e.g. `CenterInParent`).
pub const RULE_TRUE: i32 = -1;

/// Requested width/height/weight for a widget.
///
/// `weight` is only meaningful when the application set it explicitly;
/// `None` is the "no weight" state and selects the two-argument remote call
/// during replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub width: i32,
    pub height: i32,
    pub weight: Option<f32>,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            width: WRAP_CONTENT,
            height: WRAP_CONTENT,
            weight: None,
        }
    }
}

impl LayoutParams {
    /// Default params are never replayed; the host starts widgets out
    /// wrap/wrap anyway.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Outer margins in host pixels, default zero on all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Relative-layout rule slots, mirroring the host's rule vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LayoutRule {
    LeftOf = 0,
    RightOf = 1,
    Above = 2,
    Below = 3,
    AlignBaseline = 4,
    AlignLeft = 5,
    AlignTop = 6,
    AlignRight = 7,
    AlignBottom = 8,
    AlignParentLeft = 9,
    AlignParentTop = 10,
    AlignParentRight = 11,
    AlignParentBottom = 12,
    CenterInParent = 13,
    CenterHorizontal = 14,
    CenterVertical = 15,
    StartOf = 16,
    EndOf = 17,
    AlignStart = 18,
    AlignEnd = 19,
    AlignParentStart = 20,
    AlignParentEnd = 21,
}

/// Number of rule slots.
pub const RULE_COUNT: usize = 22;

impl LayoutRule {
    pub const ALL: [LayoutRule; RULE_COUNT] = [
        LayoutRule::LeftOf,
        LayoutRule::RightOf,
        LayoutRule::Above,
        LayoutRule::Below,
        LayoutRule::AlignBaseline,
        LayoutRule::AlignLeft,
        LayoutRule::AlignTop,
        LayoutRule::AlignRight,
        LayoutRule::AlignBottom,
        LayoutRule::AlignParentLeft,
        LayoutRule::AlignParentTop,
        LayoutRule::AlignParentRight,
        LayoutRule::AlignParentBottom,
        LayoutRule::CenterInParent,
        LayoutRule::CenterHorizontal,
        LayoutRule::CenterVertical,
        LayoutRule::StartOf,
        LayoutRule::EndOf,
        LayoutRule::AlignStart,
        LayoutRule::AlignEnd,
        LayoutRule::AlignParentStart,
        LayoutRule::AlignParentEnd,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// What a rule points at: a plain flag value or another widget.
///
/// Widget anchors are recorded by owner id, which stays stable across
/// suspend/resume, so replayed rules keep pointing at the right peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTarget {
    Value(i32),
    Widget(OwnerId),
}

/// The rules currently applied to one widget, one optional entry per slot.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    slots: [Option<RuleTarget>; RULE_COUNT],
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, rule: LayoutRule, target: RuleTarget) {
        self.slots[rule.index()] = Some(target);
    }

    pub fn get(&self, rule: LayoutRule) -> Option<RuleTarget> {
        self.slots[rule.index()]
    }

    /// Set rules in slot order. Slot order is the replay order, so rule
    /// replay is deterministic across restores.
    pub fn iter_set(&self) -> impl Iterator<Item = (LayoutRule, RuleTarget)> + '_ {
        LayoutRule::ALL
            .iter()
            .filter_map(|&rule| self.slots[rule.index()].map(|target| (rule, target)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Linear layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Orientation {
    Horizontal = 0,
    Vertical = 1,
}

impl From<Orientation> for AttrValue {
    fn from(orientation: Orientation) -> AttrValue {
        AttrValue::Int(orientation as i32)
    }
}

bitflags! {
    /// Gravity constants, bit-compatible with the host's encoding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Gravity: i32 {
        const TOP = 0x30;
        const BOTTOM = 0x50;
        const LEFT = 0x03;
        const RIGHT = 0x05;
        const CENTER_VERTICAL = 0x10;
        const FILL_VERTICAL = 0x70;
        const CENTER_HORIZONTAL = 0x01;
        const FILL_HORIZONTAL = 0x07;
        const CENTER = 0x11;
        const FILL = 0x77;
        const CLIP_VERTICAL = 0x80;
        const CLIP_HORIZONTAL = 0x08;
        const START = 0x0080_0003;
        const END = 0x0080_0005;
    }
}
