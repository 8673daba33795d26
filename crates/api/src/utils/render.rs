//! Plain-text rendering of command results

use abacus_core::calculator::format_sqft;
use abacus_core::{
    CalculationReport, ListingWrite, PipelineOverview, ReportOutcome, Step, ValidationErrors,
};
use abacus_domain::constants::REPORT_SUCCESS_MESSAGE;
use abacus_domain::{LeadRecord, Listing, ListingDeletion, ListingPage, PropertyCodeStats};

const RULE: &str = "----------------------------------------------------------";

/// Results screen: breakdown, total, approximate size and submission banner.
pub fn report(report: &CalculationReport) -> String {
    let mut lines = vec!["Space Requirement Summary".to_string(), RULE.to_string()];

    for line in &report.breakdown {
        lines.push(format!(
            "{:<16} {:<28} {:>12}",
            line.label,
            line.details,
            format_sqft(line.area)
        ));
    }

    lines.push(RULE.to_string());
    lines.push(format!("{:<45} {:>12}", "Total Area", format_sqft(report.total_area)));
    lines.push(format!("Approximately {} thousand square feet", report.approx_thousand_sqft()));

    let contact = &report.contact;
    if !contact.name.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Prepared for {}, {} at {}",
            contact.name, contact.designation, contact.company
        ));
    }

    if let Some(outcome) = &report.submission {
        lines.push(String::new());
        lines.push(outcome.banner().to_string());
        if let Some(reason) = outcome.failure_message() {
            lines.push(format!("Reason: {reason}"));
        }
    }

    lines.join("\n")
}

/// Every validation message for the step that refused to advance.
pub fn validation(step: Step, errors: &ValidationErrors) -> String {
    let mut lines = vec![format!("Step {} ({}) is incomplete:", step.number(), step.title())];
    lines.extend(errors.issues().iter().map(|issue| format!("  - {issue}")));
    lines.join("\n")
}

/// Dashboard counters followed by one row per lead.
pub fn overview(overview: &PipelineOverview) -> String {
    let stats = &overview.stats;
    let pagination = &overview.page.pagination;

    let mut lines = vec![
        format!(
            "Total: {}  New: {}  Contacted: {}  Qualified: {}  Closed Won: {}",
            stats.total, stats.new, stats.contacted, stats.qualified, stats.closed_won
        ),
        RULE.to_string(),
    ];

    if overview.page.leads.is_empty() {
        lines.push("No leads found".to_string());
    }
    for lead in &overview.page.leads {
        lines.push(lead_row(lead));
    }

    lines.push(RULE.to_string());
    let mut footer = format!("Page {} of {}", pagination.page, pagination.pages);
    if let Some(total) = pagination.total {
        footer.push_str(&format!(" ({total} leads)"));
    }
    lines.push(footer);

    lines.join("\n")
}

fn lead_row(lead: &LeadRecord) -> String {
    let area = if lead.total_area > 0 { format_sqft(lead.total_area) } else { "-".to_string() };
    format!(
        "{:<26} {:<20} {:<20} {:<16} {:<15} {:>12}",
        lead.id,
        lead.name,
        lead.company,
        lead.source.label(),
        lead.status.label(),
        area
    )
}

/// A single lead after an update.
pub fn lead(lead: &LeadRecord) -> String {
    let mut lines = vec![
        format!("Lead {} updated", lead.id),
        format!("  Name:    {}", lead.name),
        format!("  Company: {}", lead.company),
        format!("  Status:  {}", lead.status.label()),
    ];
    if let Some(notes) = &lead.notes {
        lines.push(format!("  Notes:   {notes}"));
    }
    lines.join("\n")
}

/// One row per listing followed by the page footer.
pub fn listings(page: &ListingPage) -> String {
    let mut lines = vec![
        format!(
            "{:<12} {:<32} {:<11} {:<14} {:>14} {:>12}",
            "Code", "Title", "Type", "Location", "Area", "Price"
        ),
        RULE.to_string(),
    ];

    if page.listings.is_empty() {
        lines.push("No listings found".to_string());
    }
    for listing in &page.listings {
        lines.push(format!(
            "{:<12} {:<32} {:<11} {:<14} {:>14} {:>12}",
            listing.property_code,
            listing.title,
            listing.kind,
            listing.location,
            listing.area,
            listing.price
        ));
    }

    lines.push(RULE.to_string());
    let pagination = &page.pagination;
    let mut footer = format!("Page {} of {}", pagination.page, pagination.pages);
    if let Some(total) = pagination.total {
        footer.push_str(&format!(" ({total} listings)"));
    }
    lines.push(footer);

    lines.join("\n")
}

/// Full detail of one listing.
pub fn listing(listing: &Listing) -> String {
    let mut lines = vec![
        format!("{} [{}]", listing.title, listing.property_code),
        format!("  Id:       {}", listing.id),
        format!("  Type:     {}", listing.kind),
        format!("  Location: {}", listing.location),
        format!("  Area:     {}", listing.area),
        format!("  Price:    {}", listing.price),
    ];
    if let Some([min, max]) = listing.views_range {
        lines.push(format!("  Views:    {min}-{max}"));
    }
    if !listing.features.is_empty() {
        lines.push("  Features:".to_string());
        lines.extend(listing.features.iter().map(|feature| format!("    - {feature}")));
    }
    lines.push(format!("  Images:   {}", listing.images.len()));
    lines.join("\n")
}

/// A titled list of names, one per line.
pub fn names(title: &str, names: &[String]) -> String {
    let mut lines = vec![format!("{title} ({})", names.len())];
    lines.extend(names.iter().map(|name| format!("  {name}")));
    lines.join("\n")
}

/// Outcome of creating or editing a listing.
pub fn listing_write(write: &ListingWrite) -> String {
    match write {
        ListingWrite::Saved { listing: saved } => {
            format!("Listing saved\n{}", listing(saved))
        }
        ListingWrite::Invalid { errors } => {
            let mut lines = vec!["Listing was not saved:".to_string()];
            lines.extend(errors.iter().map(|issue| format!("  - {}", issue.message)));
            lines.join("\n")
        }
    }
}

pub fn deletion(id: &str, deletion: &ListingDeletion) -> String {
    let mut text = format!("Listing {id} deleted");
    if let Some(cleanup) = &deletion.cleanup {
        text.push_str(&format!(
            "\n  Images removed: {} of {}",
            cleanup.cleaned_images, cleanup.total_images
        ));
        if cleanup.failed_cleanup > 0 {
            text.push_str(&format!("\n  Images left behind: {}", cleanup.failed_cleanup));
        }
    }
    text
}

/// Property code counters with the next code each prefix will issue.
pub fn code_stats(stats: &PropertyCodeStats) -> String {
    let mut lines = vec![
        format!("Listings: {}  Prefixes: {}", stats.total_listings, stats.total_counters),
        RULE.to_string(),
        format!(
            "{:<8} {:<9} {:<11} {:>6}  {:<12}",
            "Prefix", "Location", "Type", "Count", "Next Code"
        ),
    ];
    for counter in &stats.counters {
        lines.push(format!(
            "{:<8} {:<9} {:<11} {:>6}  {:<12}",
            counter.prefix,
            counter.location_code(),
            counter.kind_label(),
            counter.count,
            counter.next_code()
        ));
    }
    lines.join("\n")
}

/// Property report banner, or why the request did not go through.
pub fn report_outcome(outcome: &ReportOutcome) -> String {
    match outcome {
        ReportOutcome::Requested { .. } => REPORT_SUCCESS_MESSAGE.to_string(),
        ReportOutcome::Failed { property_code, error } => {
            format!("Report request for {property_code} failed\nReason: {error}")
        }
        ReportOutcome::Invalid { errors } => {
            let mut lines = vec!["Contact details are incomplete:".to_string()];
            lines.extend(errors.issues().iter().map(|issue| format!("  - {issue}")));
            lines.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use abacus_core::{SubmissionError, SubmissionOutcome, ValidationIssue};
    use abacus_domain::{
        Category, ContactField, ContactInfo, CreatedLead, LeadPage, LeadSource, LeadStatus,
        Pagination, SpaceRequest, Variant, WorkstationSize,
    };

    use super::*;

    fn sample_report() -> CalculationReport {
        let mut space = SpaceRequest::new();
        space.set_variant(Variant::Workstation(WorkstationSize::Standard));
        space.set_quantity(Category::Workstations, 50);
        space.set_quantity(Category::Cabins, 3);
        let contact = ContactInfo {
            name: "Asha Rao".into(),
            company: "Northwind Traders".into(),
            designation: "Head of Workplace".into(),
            phone: "+91 98450 00000".into(),
            email: "asha@northwind.in".into(),
        };
        CalculationReport::compute(&space, &contact)
    }

    #[test]
    fn report_lists_breakdown_and_formatted_total() {
        let text = report(&sample_report());

        assert!(text.contains("50 persons (Standard)"));
        assert!(text.contains("1,500 sq.ft"));
        assert!(text.contains("3 cabin(s)"));
        assert!(text.contains("1,980 sq.ft"));
        assert!(text.contains("Approximately 2 thousand square feet"));
        assert!(text.contains("Prepared for Asha Rao, Head of Workplace at Northwind Traders"));
    }

    #[test]
    fn failed_submission_shows_warning_and_reason() {
        let report = sample_report()
            .with_submission(SubmissionOutcome::Failed(SubmissionError::Timeout));
        let text = super::report(&report);

        assert!(text.contains(abacus_domain::constants::SUBMISSION_WARNING_MESSAGE));
        assert!(text.contains("Reason: Request timeout. Please try again."));
    }

    #[test]
    fn successful_submission_shows_success_banner() {
        let report = sample_report()
            .with_submission(SubmissionOutcome::Submitted(CreatedLead::default()));
        let text = super::report(&report);

        assert!(text.contains(abacus_domain::constants::SUBMISSION_SUCCESS_MESSAGE));
        assert!(!text.contains("Reason:"));
    }

    #[test]
    fn validation_lists_every_issue() {
        let errors = ValidationErrors::from(vec![
            ValidationIssue::MissingField(ContactField::Name),
            ValidationIssue::InvalidEmailFormat,
        ]);
        let text = validation(Step::EnteringContact, &errors);

        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Email is invalid"));
    }

    #[test]
    fn overview_shows_counters_and_footer() {
        let lead = LeadRecord {
            id: "l1".into(),
            name: "Meera".into(),
            company: "Contoso".into(),
            designation: String::new(),
            phone: String::new(),
            email: String::new(),
            source: LeadSource::SpaceCalculator,
            status: LeadStatus::Qualified,
            total_area: 0,
            notes: None,
            created_at: None,
        };
        let overview = PipelineOverview {
            stats: abacus_core::PipelineStats::from_leads(std::slice::from_ref(&lead)),
            page: LeadPage {
                leads: vec![lead],
                pagination: Pagination { page: 1, pages: 4, total: Some(31) },
            },
        };
        let text = super::overview(&overview);

        assert!(text.starts_with("Total: 1  New: 0  Contacted: 0  Qualified: 1"));
        assert!(text.contains("Page 1 of 4 (31 leads)"));
        assert!(text.contains("Contoso"));
    }

    fn sample_listing() -> Listing {
        serde_json::from_value(serde_json::json!({
            "_id": "64f1",
            "propertyCode": "BLR-O-007",
            "title": "Prestige Tech Park",
            "type": "Office",
            "location": "Bangalore",
            "area": "12,000 sq.ft",
            "price": "₹95/sq.ft",
            "features": ["Metro access"],
            "images": ["https://cdn.example/1.jpg"],
            "viewsRange": [120, 340]
        }))
        .unwrap()
    }

    #[test]
    fn listing_detail_shows_code_and_features() {
        let text = listing(&sample_listing());

        assert!(text.starts_with("Prestige Tech Park [BLR-O-007]"));
        assert!(text.contains("Views:    120-340"));
        assert!(text.contains("    - Metro access"));
    }

    #[test]
    fn code_stats_show_next_code() {
        let stats = PropertyCodeStats {
            total_counters: 1,
            total_listings: 7,
            counters: vec![abacus_domain::PropertyCodeCounter {
                prefix: "BLR-O".into(),
                count: 7,
                last_updated: None,
            }],
        };
        let text = code_stats(&stats);

        assert!(text.contains("BLR-O-008"));
        assert!(text.contains("Office"));
    }

    #[test]
    fn deletion_mentions_leftover_images() {
        let deletion = ListingDeletion {
            cleanup: Some(abacus_domain::ImageCleanup {
                cleaned_images: 1,
                total_images: 2,
                failed_cleanup: 1,
            }),
        };
        let text = super::deletion("64f1", &deletion);

        assert!(text.contains("Images removed: 1 of 2"));
        assert!(text.contains("Images left behind: 1"));
    }

    #[test]
    fn failed_report_shows_reason() {
        let outcome = ReportOutcome::Failed {
            property_code: "BLR-O-007".into(),
            error: SubmissionError::Rejected("Failed to submit request".into()),
        };
        let text = report_outcome(&outcome);

        assert!(text.contains("BLR-O-007"));
        assert!(text.ends_with("Reason: Failed to submit request"));
    }
}
