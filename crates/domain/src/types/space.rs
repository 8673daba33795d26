//! Office space categories, variants and the space request collection
//!
//! Area is never stored. Every entry derives it from its quantity and
//! variant when read, so a request can not hold a stale area after a
//! mutation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CABIN_SQFT, CONFERENCE_12PAX_SQFT, CONFERENCE_7PAX_SQFT, PANTRY_10PAX_SQFT, PANTRY_30PAX_SQFT,
    RECEPTION_SQFT, SERVER_ROOM_SQFT, WORKSTATION_COMPACT_SQFT, WORKSTATION_SPACIOUS_SQFT,
    WORKSTATION_STANDARD_SQFT,
};
use crate::errors::AbacusError;

// ============================================================================
// Categories
// ============================================================================

/// One of the six office-space components a client can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Workstations = 0,
    Cabins = 1,
    Reception = 2,
    Pantry = 3,
    ConferenceRoom = 4,
    ServerRoom = 5,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Workstations,
        Category::Cabins,
        Category::Reception,
        Category::Pantry,
        Category::ConferenceRoom,
        Category::ServerRoom,
    ];

    /// Wire key used by the lead API (`conferenceRoom`, `serverRoom`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::Workstations => "workstations",
            Self::Cabins => "cabins",
            Self::Reception => "reception",
            Self::Pantry => "pantry",
            Self::ConferenceRoom => "conferenceRoom",
            Self::ServerRoom => "serverRoom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Workstations => "Workstations",
            Self::Cabins => "Cabins",
            Self::Reception => "Reception",
            Self::Pantry => "Pantry",
            Self::ConferenceRoom => "Conference Room",
            Self::ServerRoom => "Server Room",
        }
    }

    /// Variant selected for a freshly created entry, if the category has any.
    pub fn default_variant(self) -> Option<Variant> {
        match self {
            Self::Workstations => Some(Variant::Workstation(WorkstationSize::default())),
            Self::Pantry => Some(Variant::Pantry(PantrySize::default())),
            Self::ConferenceRoom => Some(Variant::ConferenceRoom(ConferenceSize::default())),
            Self::Cabins | Self::Reception | Self::ServerRoom => None,
        }
    }

    /// Unit area used when no applicable variant is given.
    pub fn default_unit_area(self) -> u32 {
        match self {
            Self::Workstations => WORKSTATION_COMPACT_SQFT,
            Self::Cabins => CABIN_SQFT,
            Self::Reception => RECEPTION_SQFT,
            Self::Pantry => PANTRY_10PAX_SQFT,
            Self::ConferenceRoom => CONFERENCE_7PAX_SQFT,
            Self::ServerRoom => SERVER_ROOM_SQFT,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = AbacusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AbacusError::InvalidInput(format!("unknown category: {s}")))
    }
}

// ============================================================================
// Variants
// ============================================================================

/// Workstation size class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkstationSize {
    #[default]
    Compact,
    Standard,
    Spacious,
}

impl WorkstationSize {
    pub const ALL: [WorkstationSize; 3] = [Self::Compact, Self::Standard, Self::Spacious];

    pub fn key(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Standard => "standard",
            Self::Spacious => "spacious",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Compact => "Compact",
            Self::Standard => "Standard",
            Self::Spacious => "Spacious",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Compact => "Efficient workspace",
            Self::Standard => "Comfortable workspace",
            Self::Spacious => "Premium workspace",
        }
    }

    pub fn unit_area(self) -> u32 {
        match self {
            Self::Compact => WORKSTATION_COMPACT_SQFT,
            Self::Standard => WORKSTATION_STANDARD_SQFT,
            Self::Spacious => WORKSTATION_SPACIOUS_SQFT,
        }
    }
}

/// Pantry capacity class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PantrySize {
    #[default]
    #[serde(rename = "10pax")]
    TenPax,
    #[serde(rename = "30pax")]
    ThirtyPax,
}

impl PantrySize {
    pub const ALL: [PantrySize; 2] = [Self::TenPax, Self::ThirtyPax];

    pub fn key(self) -> &'static str {
        match self {
            Self::TenPax => "10pax",
            Self::ThirtyPax => "30pax",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TenPax => "10 Pax",
            Self::ThirtyPax => "30 Pax",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::TenPax => "Small pantry",
            Self::ThirtyPax => "Large pantry",
        }
    }

    pub fn unit_area(self) -> u32 {
        match self {
            Self::TenPax => PANTRY_10PAX_SQFT,
            Self::ThirtyPax => PANTRY_30PAX_SQFT,
        }
    }
}

/// Conference room capacity class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConferenceSize {
    #[default]
    #[serde(rename = "7pax")]
    SevenPax,
    #[serde(rename = "12pax")]
    TwelvePax,
}

impl ConferenceSize {
    pub const ALL: [ConferenceSize; 2] = [Self::SevenPax, Self::TwelvePax];

    pub fn key(self) -> &'static str {
        match self {
            Self::SevenPax => "7pax",
            Self::TwelvePax => "12pax",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SevenPax => "7 Pax",
            Self::TwelvePax => "12 Pax",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::SevenPax => "Small meeting room",
            Self::TwelvePax => "Large meeting room",
        }
    }

    pub fn unit_area(self) -> u32 {
        match self {
            Self::SevenPax => CONFERENCE_7PAX_SQFT,
            Self::TwelvePax => CONFERENCE_12PAX_SQFT,
        }
    }
}

macro_rules! impl_size_from_str {
    ($ty:ty, $what:literal) => {
        impl FromStr for $ty {
            type Err = AbacusError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.key().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| AbacusError::InvalidInput(format!("unknown {} `{s}`", $what)))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

impl_size_from_str!(WorkstationSize, "workstation size");
impl_size_from_str!(PantrySize, "pantry size");
impl_size_from_str!(ConferenceSize, "conference room size");

/// A category-specific subtype. Each variant belongs to exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Workstation(WorkstationSize),
    Pantry(PantrySize),
    ConferenceRoom(ConferenceSize),
}

impl Variant {
    pub fn category(self) -> Category {
        match self {
            Self::Workstation(_) => Category::Workstations,
            Self::Pantry(_) => Category::Pantry,
            Self::ConferenceRoom(_) => Category::ConferenceRoom,
        }
    }

    pub fn unit_area(self) -> u32 {
        match self {
            Self::Workstation(size) => size.unit_area(),
            Self::Pantry(size) => size.unit_area(),
            Self::ConferenceRoom(size) => size.unit_area(),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Workstation(size) => size.key(),
            Self::Pantry(size) => size.key(),
            Self::ConferenceRoom(size) => size.key(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Workstation(size) => size.label(),
            Self::Pantry(size) => size.label(),
            Self::ConferenceRoom(size) => size.label(),
        }
    }
}

/// Square feet per unit for `category`.
///
/// A missing variant, or one that belongs to another category, falls back to
/// the category default.
pub fn unit_area(category: Category, variant: Option<Variant>) -> u32 {
    match variant {
        Some(v) if v.category() == category => v.unit_area(),
        _ => category.default_unit_area(),
    }
}

/// `quantity * unit_area(category, variant)`, widened so it can not overflow.
pub fn area(category: Category, variant: Option<Variant>, quantity: u32) -> u64 {
    u64::from(quantity) * u64::from(unit_area(category, variant))
}

// ============================================================================
// Entries
// ============================================================================

/// Requested quantity for one category, carrying only the fields meaningful
/// to it. Workstations are counted in persons, everything else in units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceEntry {
    Workstations { size: WorkstationSize, persons: u32 },
    Cabins { count: u32 },
    Reception { count: u32 },
    Pantry { size: PantrySize, count: u32 },
    ConferenceRoom { size: ConferenceSize, count: u32 },
    ServerRoom { count: u32 },
}

impl SpaceEntry {
    /// Zero-quantity entry with the category's default variant.
    pub fn empty(category: Category) -> Self {
        match category {
            Category::Workstations => {
                Self::Workstations { size: WorkstationSize::default(), persons: 0 }
            }
            Category::Cabins => Self::Cabins { count: 0 },
            Category::Reception => Self::Reception { count: 0 },
            Category::Pantry => Self::Pantry { size: PantrySize::default(), count: 0 },
            Category::ConferenceRoom => {
                Self::ConferenceRoom { size: ConferenceSize::default(), count: 0 }
            }
            Category::ServerRoom => Self::ServerRoom { count: 0 },
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Workstations { .. } => Category::Workstations,
            Self::Cabins { .. } => Category::Cabins,
            Self::Reception { .. } => Category::Reception,
            Self::Pantry { .. } => Category::Pantry,
            Self::ConferenceRoom { .. } => Category::ConferenceRoom,
            Self::ServerRoom { .. } => Category::ServerRoom,
        }
    }

    /// Persons for workstations, unit count for every other category.
    pub fn quantity(&self) -> u32 {
        match *self {
            Self::Workstations { persons, .. } => persons,
            Self::Cabins { count }
            | Self::Reception { count }
            | Self::Pantry { count, .. }
            | Self::ConferenceRoom { count, .. }
            | Self::ServerRoom { count } => count,
        }
    }

    pub fn variant(&self) -> Option<Variant> {
        match *self {
            Self::Workstations { size, .. } => Some(Variant::Workstation(size)),
            Self::Pantry { size, .. } => Some(Variant::Pantry(size)),
            Self::ConferenceRoom { size, .. } => Some(Variant::ConferenceRoom(size)),
            Self::Cabins { .. } | Self::Reception { .. } | Self::ServerRoom { .. } => None,
        }
    }

    pub fn unit_area(&self) -> u32 {
        unit_area(self.category(), self.variant())
    }

    pub fn area(&self) -> u64 {
        area(self.category(), self.variant(), self.quantity())
    }

    fn quantity_mut(&mut self) -> &mut u32 {
        match self {
            Self::Workstations { persons, .. } => persons,
            Self::Cabins { count }
            | Self::Reception { count }
            | Self::Pantry { count, .. }
            | Self::ConferenceRoom { count, .. }
            | Self::ServerRoom { count } => count,
        }
    }

    /// Apply `variant` if it belongs to this entry's category.
    fn apply_variant(&mut self, variant: Variant) -> bool {
        match (self, variant) {
            (Self::Workstations { size, .. }, Variant::Workstation(v)) => *size = v,
            (Self::Pantry { size, .. }, Variant::Pantry(v)) => *size = v,
            (Self::ConferenceRoom { size, .. }, Variant::ConferenceRoom(v)) => *size = v,
            _ => return false,
        }
        true
    }
}

// ============================================================================
// Space request collection
// ============================================================================

/// The full set of per-category entries for one calculator session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SpaceRequestWire", from = "SpaceRequestWire")]
pub struct SpaceRequest {
    entries: [SpaceEntry; 6],
}

impl Default for SpaceRequest {
    fn default() -> Self {
        Self { entries: Category::ALL.map(SpaceEntry::empty) }
    }
}

impl SpaceRequest {
    /// All quantities zero, default variants.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, category: Category) -> &SpaceEntry {
        &self.entries[category.index()]
    }

    /// Entries in category order.
    pub fn entries(&self) -> impl Iterator<Item = &SpaceEntry> {
        self.entries.iter()
    }

    pub fn quantity(&self, category: Category) -> u32 {
        self.entry(category).quantity()
    }

    pub fn area(&self, category: Category) -> u64 {
        self.entry(category).area()
    }

    pub fn set_quantity(&mut self, category: Category, quantity: u32) {
        *self.entries[category.index()].quantity_mut() = quantity;
    }

    pub fn increment(&mut self, category: Category) {
        let quantity = self.entries[category.index()].quantity_mut();
        *quantity = quantity.saturating_add(1);
    }

    /// Decrement, clamping at zero.
    pub fn decrement(&mut self, category: Category) {
        let quantity = self.entries[category.index()].quantity_mut();
        *quantity = quantity.saturating_sub(1);
    }

    /// Select a variant. The target category is implied by the variant.
    pub fn set_variant(&mut self, variant: Variant) {
        let applied = self.entries[variant.category().index()].apply_variant(variant);
        debug_assert!(applied, "entry order must match Category::ALL");
    }

    /// Sum of every category's area.
    pub fn total_area(&self) -> u64 {
        self.entries.iter().map(SpaceEntry::area).sum()
    }

    /// `true` when at least one category has a non-zero quantity.
    pub fn has_requirements(&self) -> bool {
        self.entries.iter().any(|e| e.quantity() > 0)
    }

    /// Back to zero quantities and default variants.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SpaceRequestWire {
    workstations: WorkstationsWire,
    cabins: CountWire,
    reception: CountWire,
    pantry: SizedWire,
    conference_room: SizedWire,
    server_room: CountWire,
}

// Variant keys travel as plain strings so an unknown key degrades to the
// category default instead of failing the whole payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct WorkstationsWire {
    #[serde(rename = "type")]
    kind: String,
    persons: u32,
    area: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct SizedWire {
    #[serde(rename = "type")]
    kind: String,
    count: u32,
    area: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct CountWire {
    count: u32,
    area: u64,
}

impl From<SpaceRequest> for SpaceRequestWire {
    fn from(request: SpaceRequest) -> Self {
        let mut wire = SpaceRequestWire::default();
        for entry in request.entries() {
            let area = entry.area();
            match *entry {
                SpaceEntry::Workstations { size, persons } => {
                    wire.workstations =
                        WorkstationsWire { kind: size.key().to_string(), persons, area };
                }
                SpaceEntry::Cabins { count } => wire.cabins = CountWire { count, area },
                SpaceEntry::Reception { count } => wire.reception = CountWire { count, area },
                SpaceEntry::Pantry { size, count } => {
                    wire.pantry = SizedWire { kind: size.key().to_string(), count, area };
                }
                SpaceEntry::ConferenceRoom { size, count } => {
                    wire.conference_room = SizedWire { kind: size.key().to_string(), count, area };
                }
                SpaceEntry::ServerRoom { count } => wire.server_room = CountWire { count, area },
            }
        }
        wire
    }
}

impl From<SpaceRequestWire> for SpaceRequest {
    fn from(wire: SpaceRequestWire) -> Self {
        let mut request = SpaceRequest::new();

        request.set_quantity(Category::Workstations, wire.workstations.persons);
        request.set_variant(Variant::Workstation(
            wire.workstations.kind.parse().unwrap_or_default(),
        ));
        request.set_quantity(Category::Cabins, wire.cabins.count);
        request.set_quantity(Category::Reception, wire.reception.count);
        request.set_quantity(Category::Pantry, wire.pantry.count);
        request.set_variant(Variant::Pantry(wire.pantry.kind.parse().unwrap_or_default()));
        request.set_quantity(Category::ConferenceRoom, wire.conference_room.count);
        request.set_variant(Variant::ConferenceRoom(
            wire.conference_room.kind.parse().unwrap_or_default(),
        ));
        request.set_quantity(Category::ServerRoom, wire.server_room.count);

        request
    }
}
