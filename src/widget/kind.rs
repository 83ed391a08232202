use std::sync::OnceLock;

use crate::event::EventKind;
use crate::registry::{AttrDescriptor, AttrRegistry};
use crate::value::ValueKind;

use ValueKind::{Bool, Float, FloatFloat, FloatTripleInt, Int, IntFloat, IntQuad, Text};

/// Attributes every view-like widget understands.
const VIEW_ATTRS: &[AttrDescriptor] = &[
    ("AccessibilityLiveRegion", Int),
    ("Alpha", Float),
    ("BackgroundResource", Int),
    ("Clickable", Bool),
    ("DrawingCacheQuality", Int),
    ("ScrollbarFadingEnabled", Bool),
    ("FilterTouchesWhenObscured", Bool),
    ("FitsSystemWindows", Bool),
    ("Focusable", Bool),
    ("FocusableInTouchMode", Bool),
    ("HapticFeedbackEnabled", Bool),
    ("Id", Int),
    ("ImportantForAccessibility", Int),
    ("ScrollContainer", Bool),
    ("KeepScreenOn", Bool),
    ("LayoutDirection", Int),
    ("LongClickable", Bool),
    ("MinimumHeight", Int),
    ("MinimumWidth", Int),
    ("NextFocusDownId", Int),
    ("NextFocusForwardId", Int),
    ("NextFocusLeftId", Int),
    ("NextFocusRightId", Int),
    ("NextFocusUpId", Int),
    ("PaddingRelative", IntQuad),
    ("Padding", IntQuad),
    ("VerticalFadingEdgeEnabled", Bool),
    ("Rotation", Float),
    ("RotationX", Float),
    ("RotationY", Float),
    ("SaveEnabled", Bool),
    ("ScaleX", Float),
    ("ScaleY", Float),
    ("ScrollBarDefaultDelayBeforeFade", Int),
    ("ScrollBarFadeDuration", Int),
    ("ScrollBarSize", Int),
    ("ScrollBarStyle", Int),
    ("SoundEffectsEnabled", Bool),
    ("TextAlignment", Int),
    ("TextDirection", Int),
    ("PivotX", Float),
    ("PivotY", Float),
    ("TranslationX", Float),
    ("TranslationY", Float),
    ("Visibility", Int),
];

const TEXT_VIEW_ATTRS: &[AttrDescriptor] = &[
    ("AutoLinkMask", Int),
    ("Text", Text),
    ("CursorVisible", Bool),
    ("CompoundDrawablesWithIntrinsicBounds", IntQuad),
    ("CompoundDrawablesRelativeWithIntrinsicBounds", IntQuad),
    ("CompoundDrawablePadding", Int),
    ("InputExtras", Int),
    ("Ellipsize", Int),
    ("Ems", Int),
    ("Typeface", Int),
    ("FreezesText", Bool),
    ("Gravity", Int),
    ("Height", Int),
    ("Hint", Int),
    ("ImeOptions", Int),
    ("IncludeFontPadding", Bool),
    ("RawInputType", Int),
    ("LineSpacing", FloatFloat),
    ("Lines", Int),
    ("LinksClickable", Bool),
    ("MarqueeRepeatLimit", Int),
    ("MaxEms", Int),
    ("MaxHeight", Int),
    ("MaxLines", Int),
    ("MaxWidth", Int),
    ("MinEms", Int),
    ("MinHeight", Int),
    ("MinLines", Int),
    ("MinWidth", Int),
    ("PrivateImeOptions", Text),
    ("HorizontallyScrolling", Bool),
    ("SelectAllOnFocus", Bool),
    ("ShadowLayer", FloatTripleInt),
    ("AllCaps", Bool),
    ("TextColor", Int),
    ("HighlightColor", Int),
    ("HintTextColor", Int),
    ("LinkTextColor", Int),
    ("TextScaleX", Float),
    ("TextSize", IntFloat),
    ("Width", Int),
];

const PROGRESS_BAR_ATTRS: &[AttrDescriptor] = &[
    ("Indeterminate", Bool),
    ("Max", Int),
    ("Progress", Int),
    ("SecondaryProgress", Int),
    ("Visibility", Int),
];

const SEEK_BAR_ATTRS: &[AttrDescriptor] = &[("Max", Int), ("Progress", Int)];

const COMPOUND_BUTTON_ATTRS: &[AttrDescriptor] = &[("Checked", Bool)];

const SWITCH_ATTRS: &[AttrDescriptor] = &[
    ("TextOn", Text),
    ("TextOff", Text),
    ("SwitchMinWidth", Int),
    ("SwitchPadding", Int),
    ("SwitchTypeface", Int),
    ("ThumbTextPadding", Int),
];

const TOGGLE_BUTTON_ATTRS: &[AttrDescriptor] = &[("TextOn", Text), ("TextOff", Text)];

const LINEAR_LAYOUT_ATTRS: &[AttrDescriptor] = &[
    ("Orientation", Int),
    ("Gravity", Int),
    ("WeightSum", Float),
    ("BaselineAligned", Bool),
];

const RELATIVE_LAYOUT_ATTRS: &[AttrDescriptor] = &[("Gravity", Int), ("IgnoreGravity", Int)];

const DIALOG_ATTRS: &[AttrDescriptor] = &[("Title", Text), ("Cancelable", Bool)];

const ALERT_DIALOG_ATTRS: &[AttrDescriptor] = &[("Message", Text)];

/// Horizontal-bar style codes the host accepts at progress bar creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ProgressBarStyle {
    Default = 0x0101_0077,
    Horizontal = 0x0101_0078,
    Small = 0x0101_0079,
    Large = 0x0101_007A,
    Inverse = 0x0101_0287,
    SmallInverse = 0x0101_0288,
    LargeInverse = 0x0101_0289,
    SmallTitle = 0x0101_020F,
}

impl From<ProgressBarStyle> for i32 {
    fn from(style: ProgressBarStyle) -> i32 {
        style as i32
    }
}

/// Widget capability tag.
///
/// One variant per supported peer class. The original class hierarchy
/// (view → text view → button → compound button → checkbox/switch/…)
/// survives only as composed attribute registries and per-kind capability
/// answers; there is no behavioral inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    TextView,
    Button,
    CheckBox,
    Switch,
    ToggleButton,
    RadioButton,
    CheckedTextView,
    ProgressBar,
    SeekBar,
    LinearLayout,
    RelativeLayout,
    RadioGroup,
    Dialog,
    AlertDialog,
}

/// Composed registries, one per hierarchy level, built exactly once.
struct RegistrySet {
    text_view: AttrRegistry,
    compound: AttrRegistry,
    switch_: AttrRegistry,
    toggle: AttrRegistry,
    progress: AttrRegistry,
    seek: AttrRegistry,
    linear: AttrRegistry,
    relative: AttrRegistry,
    dialog: AttrRegistry,
    alert: AttrRegistry,
}

impl RegistrySet {
    fn build() -> Self {
        let view = AttrRegistry::compose(None, VIEW_ATTRS);
        let text_view = AttrRegistry::compose(Some(&view), TEXT_VIEW_ATTRS);
        let compound = AttrRegistry::compose(Some(&text_view), COMPOUND_BUTTON_ATTRS);
        let switch_ = AttrRegistry::compose(Some(&compound), SWITCH_ATTRS);
        let toggle = AttrRegistry::compose(Some(&compound), TOGGLE_BUTTON_ATTRS);
        let progress = AttrRegistry::compose(Some(&view), PROGRESS_BAR_ATTRS);
        let seek = AttrRegistry::compose(Some(&progress), SEEK_BAR_ATTRS);
        let linear = AttrRegistry::compose(Some(&view), LINEAR_LAYOUT_ATTRS);
        let relative = AttrRegistry::compose(Some(&view), RELATIVE_LAYOUT_ATTRS);
        let dialog = AttrRegistry::compose(None, DIALOG_ATTRS);
        let alert = AttrRegistry::compose(Some(&dialog), ALERT_DIALOG_ATTRS);
        Self {
            text_view,
            compound,
            switch_,
            toggle,
            progress,
            seek,
            linear,
            relative,
            dialog,
            alert,
        }
    }

    fn shared() -> &'static RegistrySet {
        static SET: OnceLock<RegistrySet> = OnceLock::new();
        SET.get_or_init(RegistrySet::build)
    }
}

impl WidgetKind {
    /// The composed attribute registry for this kind.
    ///
    /// Built lazily on first use and shared process-wide; construction
    /// panics on conflicting descriptor tables (see [`AttrRegistry::compose`]).
    pub fn registry(self) -> &'static AttrRegistry {
        let set = RegistrySet::shared();
        match self {
            WidgetKind::TextView | WidgetKind::Button => &set.text_view,
            WidgetKind::CheckBox | WidgetKind::RadioButton | WidgetKind::CheckedTextView => {
                &set.compound
            }
            WidgetKind::Switch => &set.switch_,
            WidgetKind::ToggleButton => &set.toggle,
            WidgetKind::ProgressBar => &set.progress,
            WidgetKind::SeekBar => &set.seek,
            WidgetKind::LinearLayout | WidgetKind::RadioGroup => &set.linear,
            WidgetKind::RelativeLayout => &set.relative,
            WidgetKind::Dialog => &set.dialog,
            WidgetKind::AlertDialog => &set.alert,
        }
    }

    /// Class name requested from the host at peer creation.
    pub fn remote_class(self) -> &'static str {
        match self {
            WidgetKind::TextView => "TextView",
            WidgetKind::Button => "Button",
            WidgetKind::CheckBox => "CheckBox",
            WidgetKind::Switch => "Switch",
            WidgetKind::ToggleButton => "ToggleButton",
            WidgetKind::RadioButton => "RadioButton",
            WidgetKind::CheckedTextView => "CheckedTextView",
            WidgetKind::ProgressBar => "ProgressBar",
            WidgetKind::SeekBar => "SeekBar",
            WidgetKind::LinearLayout => "LinearLayout",
            WidgetKind::RelativeLayout => "RelativeLayout",
            WidgetKind::RadioGroup => "RadioGroup",
            WidgetKind::Dialog => "Dialog",
            WidgetKind::AlertDialog => "AlertDialog",
        }
    }

    /// Container kinds own an ordered child list and reparent child peers.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            WidgetKind::LinearLayout
                | WidgetKind::RelativeLayout
                | WidgetKind::RadioGroup
                | WidgetKind::Dialog
                | WidgetKind::AlertDialog
        )
    }

    /// Dialog kinds occupy the bridge's single dialog slot.
    pub fn is_dialog(self) -> bool {
        matches!(self, WidgetKind::Dialog | WidgetKind::AlertDialog)
    }

    /// Kinds that carry a host-confirmed checked flag.
    pub fn is_compound(self) -> bool {
        matches!(
            self,
            WidgetKind::CheckBox
                | WidgetKind::Switch
                | WidgetKind::ToggleButton
                | WidgetKind::RadioButton
                | WidgetKind::CheckedTextView
        )
    }

    /// Whether this kind ever delivers `event`. Gate for `set_callback`.
    pub fn accepts(self, event: EventKind) -> bool {
        match event {
            EventKind::SeekBarStopTracking
            | EventKind::SeekBarStartTracking
            | EventKind::SeekBarProgressChanged => self == WidgetKind::SeekBar,
            EventKind::CheckedChanged => self.is_compound(),
            EventKind::ButtonDown | EventKind::ButtonUp | EventKind::ButtonCanceled => {
                self == WidgetKind::Button || self.is_compound()
            }
            EventKind::DialogDismissed | EventKind::DialogCancelled => self.is_dialog(),
        }
    }
}
