use poise::serenity_prelude::CreateEmbed;
use std::time::Duration;

use crate::constants::icon;
use crate::functions::format::pretty_message;
use crate::functions::ui::embed::Palette;
use crate::interactive::Menu;
use crate::interactive::pagination::PaginationPage;
use crate::{Context, Error};

const COMMANDS_PER_PAGE: usize = 6;
const HELP_THRESHOLD: Duration = Duration::from_secs(120);

/// Browse everything the house offers.
#[poise::command(
    slash_command,
    prefix_command,
    track_edits,
    aliases("h"),
    category = "General"
)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let palette = Palette::from_settings(&ctx.data().settings);
    let pages = build_pages(&ctx, palette);

    let mut menu = Menu::new(()).threshold(HELP_THRESHOLD);
    menu.set_page(Box::new(PaginationPage::new(ctx.author().id, pages, palette)));
    menu.start(ctx).await
}

fn build_pages(ctx: &Context<'_>, palette: Palette) -> Vec<CreateEmbed> {
    let entries: Vec<String> = ctx
        .framework()
        .options
        .commands
        .iter()
        .filter(|command| !command.hide_in_help)
        .map(|command| {
            let description = command.description.as_deref().unwrap_or("No description");
            let category = command.category.as_deref().unwrap_or("General");
            pretty_message(
                icon::GEAR,
                format!("`/{}` — {description} _({category})_", command.name),
            )
        })
        .collect();

    if entries.is_empty() {
        return vec![
            CreateEmbed::new()
                .title("Commands")
                .colour(palette.primary)
                .description(pretty_message(icon::BELL, "No commands available yet.")),
        ];
    }

    entries
        .chunks(COMMANDS_PER_PAGE)
        .map(|chunk| {
            CreateEmbed::new()
                .title("Commands")
                .colour(palette.primary)
                .description(chunk.join("\n"))
        })
        .collect()
}
