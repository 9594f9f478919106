//! Handler for the `dashboard` command.

use super::render;
use crate::app::{AppContext, Section, SectionData};

pub async fn execute(ctx: &AppContext) -> anyhow::Result<()> {
    if let SectionData::Dashboard(snapshot) = ctx.load_section(Section::Dashboard).await? {
        render::dashboard(&snapshot);
    }
    Ok(())
}
