//! Command-line interface definition

use std::path::PathBuf;

use abacus_domain::constants::{
    DEFAULT_LEADS_PAGE_SIZE, DEFAULT_LISTINGS_PAGE_SIZE, DEFAULT_VIEWS_RANGE,
};
use abacus_domain::{
    Category, ConferenceSize, ContactInfo, LeadQuery, LeadSource, LeadStatus, LeadUpdate,
    ListingChanges, ListingDraft, ListingQuery, PantrySize, Variant, WorkstationSize,
};
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::commands::SpaceInput;

/// Office space calculator, listings and lead pipeline tool.
#[derive(Debug, Parser)]
#[command(name = "abacus", version, about)]
pub struct Cli {
    /// Config file (JSON or TOML). Probed in standard locations when omitted.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Lead API base URL, overriding config and environment.
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the space breakdown without submitting anything.
    Estimate(SpaceArgs),

    /// Run the full calculator: configure, enter contact, submit, show results.
    Calculate(CalculateArgs),

    /// Back-office lead pipeline operations.
    Leads {
        #[command(subcommand)]
        command: LeadsCommand,
    },

    /// Browse and maintain property listings.
    Listings {
        #[command(subcommand)]
        command: ListingsCommand,
    },
}

/// Space requirements. Quantities accept free text (`"12abc"` counts as 12).
#[derive(Debug, Clone, Args)]
pub struct SpaceArgs {
    /// Number of persons needing workstations.
    #[arg(long, value_name = "N")]
    pub workstations: Option<String>,

    #[arg(long, value_name = "SIZE", default_value = "compact")]
    pub workstation_size: WorkstationSize,

    #[arg(long, value_name = "N")]
    pub cabins: Option<String>,

    #[arg(long, value_name = "N")]
    pub reception: Option<String>,

    #[arg(long, value_name = "N")]
    pub pantry: Option<String>,

    #[arg(long, value_name = "SIZE", default_value = "10pax")]
    pub pantry_size: PantrySize,

    #[arg(long, value_name = "N")]
    pub conference_rooms: Option<String>,

    #[arg(long, value_name = "SIZE", default_value = "7pax")]
    pub conference_size: ConferenceSize,

    #[arg(long, value_name = "N")]
    pub server_rooms: Option<String>,
}

impl SpaceArgs {
    pub fn to_input(&self) -> SpaceInput {
        let quantities = [
            (Category::Workstations, &self.workstations),
            (Category::Cabins, &self.cabins),
            (Category::Reception, &self.reception),
            (Category::Pantry, &self.pantry),
            (Category::ConferenceRoom, &self.conference_rooms),
            (Category::ServerRoom, &self.server_rooms),
        ]
        .into_iter()
        .filter_map(|(category, raw)| raw.as_ref().map(|raw| (category, raw.clone())))
        .collect();

        SpaceInput {
            quantities,
            variants: vec![
                Variant::Workstation(self.workstation_size),
                Variant::Pantry(self.pantry_size),
                Variant::ConferenceRoom(self.conference_size),
            ],
        }
    }
}

/// Contact details. Missing fields are reported as validation errors.
#[derive(Debug, Clone, Args)]
pub struct ContactArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub company: String,

    #[arg(long, default_value = "")]
    pub designation: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub email: String,
}

impl From<ContactArgs> for ContactInfo {
    fn from(args: ContactArgs) -> Self {
        ContactInfo {
            name: args.name,
            company: args.company,
            designation: args.designation,
            phone: args.phone,
            email: args.email,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub space: SpaceArgs,

    #[command(flatten)]
    pub contact: ContactArgs,
}

#[derive(Debug, Subcommand)]
pub enum LeadsCommand {
    /// List one page of leads with pipeline counters.
    List(ListArgs),

    /// Change a lead's status and/or notes.
    Update(UpdateArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = DEFAULT_LEADS_PAGE_SIZE)]
    pub limit: u32,

    /// Free-text search over name, company and email.
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub source: Option<LeadSource>,

    #[arg(long)]
    pub status: Option<LeadStatus>,
}

impl From<ListArgs> for LeadQuery {
    fn from(args: ListArgs) -> Self {
        LeadQuery {
            page: args.page,
            limit: args.limit,
            search: args.search,
            source: args.source,
            status: args.status,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Lead id.
    pub id: String,

    #[arg(long)]
    pub status: Option<LeadStatus>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl UpdateArgs {
    pub fn to_update(&self) -> LeadUpdate {
        LeadUpdate { status: self.status, notes: self.notes.clone() }
    }
}

#[derive(Debug, Subcommand)]
pub enum ListingsCommand {
    /// Browse one page of listings.
    List(ListingListArgs),

    /// Show a single listing.
    Show {
        /// Listing id.
        id: String,
    },

    /// Locations that have listings.
    Locations,

    /// Listing types in use.
    Types,

    /// Publish a new listing. The property code is assigned by the API.
    Create(ListingCreateArgs),

    /// Edit an existing listing. Images can only be added.
    Update(ListingUpdateArgs),

    /// Delete a listing and its uploaded images.
    Delete {
        /// Listing id.
        id: String,
    },

    /// Property code counters per location and type.
    Codes,

    /// Request a detailed property report for a listing.
    Report(ReportArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ListingListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = DEFAULT_LISTINGS_PAGE_SIZE)]
    pub limit: u32,

    /// Free-text search over title, location and property code.
    #[arg(long)]
    pub search: Option<String>,

    /// Location name, or `all`.
    #[arg(long)]
    pub location: Option<String>,

    /// Listing type (Office, Retail, Co-Working), or `all`.
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
}

impl From<ListingListArgs> for ListingQuery {
    fn from(args: ListingListArgs) -> Self {
        ListingQuery {
            page: args.page,
            limit: args.limit,
            search: args.search,
            location: args.location,
            kind: args.kind,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ListingCreateArgs {
    #[arg(long, default_value = "")]
    pub title: String,

    #[arg(long = "type", value_name = "TYPE", default_value = "Office")]
    pub kind: String,

    #[arg(long, default_value = "")]
    pub location: String,

    /// Display area, e.g. "4,500 sq.ft".
    #[arg(long, default_value = "")]
    pub area: String,

    /// Display price, e.g. "₹85/sq.ft".
    #[arg(long, default_value = "")]
    pub price: String,

    /// Repeat for each feature.
    #[arg(long = "feature", value_name = "TEXT")]
    pub features: Vec<String>,

    /// Repeat for each image URL.
    #[arg(long = "image", value_name = "URL")]
    pub images: Vec<String>,

    /// Range the listing's view counter is drawn from.
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    pub views: Option<Vec<u32>>,
}

impl ListingCreateArgs {
    pub fn to_draft(&self) -> ListingDraft {
        ListingDraft {
            title: self.title.clone(),
            kind: self.kind.clone(),
            location: self.location.clone(),
            area: self.area.clone(),
            price: self.price.clone(),
            features: self.features.clone(),
            images: self.images.clone(),
            views_range: views_range(self.views.as_deref()).unwrap_or(DEFAULT_VIEWS_RANGE),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ListingUpdateArgs {
    /// Listing id.
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub area: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    /// Replaces the feature list. Repeat for each feature.
    #[arg(long = "feature", value_name = "TEXT")]
    pub features: Vec<String>,

    /// Appends an image URL. Repeatable.
    #[arg(long = "add-image", value_name = "URL")]
    pub add_images: Vec<String>,

    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    pub views: Option<Vec<u32>>,
}

impl ListingUpdateArgs {
    pub fn to_changes(&self) -> ListingChanges {
        ListingChanges {
            title: self.title.clone(),
            kind: self.kind.clone(),
            location: self.location.clone(),
            area: self.area.clone(),
            price: self.price.clone(),
            features: (!self.features.is_empty()).then(|| self.features.clone()),
            add_images: self.add_images.clone(),
            views_range: views_range(self.views.as_deref()),
        }
    }
}

fn views_range(values: Option<&[u32]>) -> Option<[u32; 2]> {
    match values? {
        [min, max] => Some([*min, *max]),
        _ => None,
    }
}

#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Listing id.
    pub id: String,

    #[command(flatten)]
    pub contact: ContactArgs,
}
