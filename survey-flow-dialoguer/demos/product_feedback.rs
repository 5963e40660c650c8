//! Product feedback survey in the terminal. Run with: cargo run -p survey-flow-dialoguer --example product_feedback

use example_catalogs::product_feedback;
use survey_flow::{ClientMetadata, RedirectSubmitter, Submitter, run};
use survey_flow_dialoguer::DialoguerRenderer;

fn main() -> anyhow::Result<()> {
    let catalog = product_feedback()?;
    let session = run(&catalog, &mut DialoguerRenderer::new())?;

    for record in session.records() {
        println!("{record:?}");
    }

    let submission = session.submission(ClientMetadata::new())?;
    let url = RedirectSubmitter::new("https://example.com/thanks")?.submit(&submission)?;
    println!("{url}");
    Ok(())
}
