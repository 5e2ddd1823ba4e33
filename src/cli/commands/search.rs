//! `casedesk search` command - Look up one case by its natural key

use console::style;
use miette::Result;

use crate::cli::helpers::{open_store, or_dash, render_structured};
use crate::cli::GlobalOpts;
use crate::core::{lookup, CaseDetails, LookupError, SearchRequest};

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Case type abbreviation (e.g. "WP(C)", "CRL.A")
    pub case_type: String,

    /// Case number
    pub case_number: String,

    /// Filing year
    pub filing_year: String,
}

pub fn run(args: SearchArgs, global: &GlobalOpts) -> Result<()> {
    let (_config, store) = open_store(global)?;
    let request = SearchRequest::new(args.case_type, args.case_number, args.filing_year);

    let details = match lookup(&store, &request) {
        Ok(details) => details,
        Err(err @ (LookupError::MissingFields | LookupError::NotFound)) => {
            return Err(miette::miette!("{}", err));
        }
        Err(LookupError::Store(err)) => {
            return Err(miette::miette!("Lookup failed: {}", err));
        }
    };

    if let Some(out) = render_structured(&details, global.format)? {
        println!("{}", out);
        return Ok(());
    }

    print_details(&details);
    Ok(())
}

fn print_details(details: &CaseDetails) {
    println!("{}", style(&details.case_title).bold());
    println!("{}", style(&details.case_type_name).dim());
    println!("{}", style("─".repeat(40)).dim());
    println!("  Petitioner:    {}", details.petitioner);
    println!("  Respondent:    {}", details.respondent);
    println!("  Filing date:   {}", details.filing_date);
    println!("  Next hearing:  {}", style(&details.next_hearing).cyan());
    println!("  Status:        {}", or_dash(details.status.as_deref()));
    println!("  Judge:         {}", or_dash(details.judge.as_deref()));

    if !details.orders.is_empty() {
        println!();
        println!("{}", style("Orders").bold());
        for order in &details.orders {
            println!(
                "  {}  {}",
                style(&order.date).yellow(),
                or_dash(order.description.as_deref())
            );
            if let Some(ref link) = order.pdf_link {
                println!("      {}", style(link).underlined());
            }
        }
    }
}
