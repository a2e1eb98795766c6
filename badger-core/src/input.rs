//! Button and wake-source tracking
//!
//! Two masks are kept: the lines that were asserted when the badge powered
//! up (what woke it), and the lines asserted at the most recent poll.

use badger_hal::InputBank;

use crate::pins;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Logical input lines
///
/// The RTC alarm line is tracked alongside the buttons because it is one
/// of the ways the badge gets woken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Button {
    A,
    B,
    C,
    D,
    E,
    Rtc,
}

/// Button names, including orientation aliases
const BUTTON_NAMES: [(&str, Button); 8] = [
    ("A", Button::A),
    ("B", Button::B),
    ("C", Button::C),
    ("D", Button::D),
    ("E", Button::E),
    ("UP", Button::D),
    ("DOWN", Button::E),
    ("RTC", Button::Rtc),
];

impl Button {
    /// Alias for [`Button::D`] in the default orientation
    pub const UP: Button = Button::D;
    /// Alias for [`Button::E`] in the default orientation
    pub const DOWN: Button = Button::E;

    /// All tracked lines
    pub const ALL: [Button; 6] = [
        Button::A,
        Button::B,
        Button::C,
        Button::D,
        Button::E,
        Button::Rtc,
    ];

    /// GPIO number the line is wired to
    pub const fn gpio(self) -> u8 {
        match self {
            Button::A => pins::A,
            Button::B => pins::B,
            Button::C => pins::C,
            Button::D => pins::D,
            Button::E => pins::E,
            Button::Rtc => pins::RTC,
        }
    }

    /// Resolve a button by name or alias (case-insensitive)
    pub fn from_name(name: &str) -> Option<Button> {
        let name = name.trim();
        BUTTON_NAMES
            .iter()
            .find(|(button_name, _)| button_name.eq_ignore_ascii_case(name))
            .map(|&(_, button)| button)
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// GPIO word mask covering every tracked line
pub const INPUT_GPIO_MASK: u32 = (1 << pins::A)
    | (1 << pins::B)
    | (1 << pins::C)
    | (1 << pins::D)
    | (1 << pins::E)
    | (1 << pins::RTC);

/// Set of asserted input lines, indexed by [`Button`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonMask(u8);

impl ButtonMask {
    /// No lines asserted
    pub const EMPTY: ButtonMask = ButtonMask(0);

    /// Convert a raw GPIO word (bit `n` = GPIO `n`) into a button mask
    ///
    /// Bits for GPIOs that are not tracked inputs are ignored.
    pub fn from_gpio(word: u32) -> Self {
        Button::ALL
            .iter()
            .filter(|button| word & (1 << button.gpio()) != 0)
            .fold(Self::EMPTY, |mask, &button| mask.with(button))
    }

    /// Copy of this mask with `button` asserted
    pub const fn with(self, button: Button) -> Self {
        ButtonMask(self.0 | button.bit())
    }

    /// Check whether `button` is asserted
    pub const fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    /// Check whether no line is asserted
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bits, bit `n` = `Button` discriminant `n`
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Iterate over the asserted buttons
    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |&b| self.contains(b))
    }
}

/// Tracks the wake mask and the current button mask
///
/// Construction is the wake sample: nothing can poll the bank before the
/// wake mask has been captured.
pub struct InputStateTracker<B> {
    bank: B,
    /// Lines asserted at power-up, never changed afterwards
    wake: ButtonMask,
    /// Lines asserted at the latest poll
    current: ButtonMask,
}

impl<B: InputBank> InputStateTracker<B> {
    /// Capture the wake sources with one read of the bank
    pub fn init(mut bank: B) -> Self {
        let wake = ButtonMask::from_gpio(bank.read_all());
        Self {
            bank,
            wake,
            current: ButtonMask::EMPTY,
        }
    }

    /// Resample every input line, replacing the previous current mask
    pub fn update(&mut self) {
        self.current = ButtonMask::from_gpio(self.bank.read_all());
    }

    /// Check the latest poll for `button`
    pub fn pressed(&self, button: Button) -> bool {
        self.current.contains(button)
    }

    /// Check whether `button` was asserted when the badge woke
    pub fn pressed_to_wake(&self, button: Button) -> bool {
        self.wake.contains(button)
    }

    /// Mask from the latest poll
    pub fn button_states(&self) -> ButtonMask {
        self.current
    }

    /// Mask captured at wake
    pub fn wake_states(&self) -> ButtonMask {
        self.wake
    }

    /// Block until a full press-then-release cycle has been seen
    ///
    /// Polls until any line reads asserted, then spins until every line
    /// reads released at the same time. There is no debounce (a bounce
    /// counts as a press), no timeout and no way to cancel: the caller is
    /// expected to restart the badge right after.
    pub fn wait_for_press(&mut self) {
        self.update();
        while self.current.is_empty() {
            self.bank.relax();
            self.update();
        }

        while self.bank.read_all() & INPUT_GPIO_MASK != 0 {
            self.bank.relax();
        }
    }

    /// Get access to the underlying input bank
    pub fn bank(&self) -> &B {
        &self.bank
    }
}
