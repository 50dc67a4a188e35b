use crate::model::{Lead, LeadStatus, Opportunity, OpportunityStage};
use colored::Colorize;

/// Format status with color coding
pub fn format_status(status: LeadStatus) -> colored::ColoredString {
    match status {
        LeadStatus::New => "New".blue(),
        LeadStatus::Contacted => "Contacted".yellow(),
        LeadStatus::Qualified => "Qualified".green(),
        LeadStatus::Unqualified => "Unqualified".dimmed(),
    }
}

/// Format stage with color coding
pub fn format_stage(stage: OpportunityStage) -> colored::ColoredString {
    match stage {
        OpportunityStage::Prospecting => "Prospecting".green(),
        OpportunityStage::Proposal => "Proposal".yellow(),
        OpportunityStage::Closed => "Closed".dimmed(),
    }
}

pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:>3.0}", score)
    } else {
        format!("{:>5.1}", score)
    }
}

/// Print a single lead with details
pub fn print_lead(lead: &Lead) {
    println!("{} {}", lead.id.cyan().bold(), lead.name.bold());
    println!("Company: {}", lead.company);
    println!("Email:   {}", lead.email);
    println!("Source:  {}", lead.source.dimmed());
    println!("Status:  {}", format_status(lead.status));
    println!("Score:   {}", format_score(lead.score).trim());
}

/// Print a list of leads (compact format)
pub fn print_lead_list(leads: &[Lead]) {
    if leads.is_empty() {
        println!("No leads found.");
        return;
    }

    for lead in leads {
        println!(
            "{} {} [{}] {} {}",
            format_score(lead.score).bold(),
            lead.id.cyan(),
            format_status(lead.status),
            lead.name,
            format!("({})", lead.company).dimmed()
        );
    }
}

pub fn print_opportunity_list(opportunities: &[Opportunity]) {
    if opportunities.is_empty() {
        println!("No opportunities yet.");
        return;
    }

    for opp in opportunities {
        let amount = opp
            .amount
            .map(|a| format!(" {:.2}", a))
            .unwrap_or_default();
        println!(
            "{} [{}] {} {}{}",
            opp.id.cyan(),
            format_stage(opp.stage),
            opp.name,
            format!("({})", opp.account_name).dimmed(),
            amount.green()
        );
    }
}
