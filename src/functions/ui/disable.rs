use poise::serenity_prelude as serenity;
use serenity::model::application::{ActionRow, ActionRowComponent, Button, ButtonKind, SelectMenu};
use serenity::{
    ComponentType, CreateActionRow, CreateButton, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption,
};

/// Rebuilds a message's action rows with every interactive component disabled.
///
/// Used when a menu or registration reaches its terminal state: the message
/// stays visible but can no longer be interacted with.
pub fn disable_action_rows(rows: &[ActionRow]) -> Vec<CreateActionRow> {
    rows.iter().filter_map(disable_row).collect()
}

fn disable_row(row: &ActionRow) -> Option<CreateActionRow> {
    let mut buttons = Vec::new();
    for component in &row.components {
        match component {
            ActionRowComponent::Button(button) => buttons.push(disabled_button(button)),
            ActionRowComponent::SelectMenu(menu) => {
                return disabled_select(menu).map(CreateActionRow::SelectMenu);
            }
            // Text inputs only appear inside modals, never on messages.
            _ => {}
        }
    }

    (!buttons.is_empty()).then(|| CreateActionRow::Buttons(buttons))
}

fn disabled_button(button: &Button) -> CreateButton {
    let mut create = match &button.data {
        ButtonKind::Link { url } => CreateButton::new_link(url),
        ButtonKind::Premium { sku_id } => CreateButton::new_premium(*sku_id),
        ButtonKind::NonLink { custom_id, style } => CreateButton::new(custom_id).style(*style),
    };

    if let Some(label) = &button.label {
        create = create.label(label);
    }
    if let Some(emoji) = &button.emoji {
        create = create.emoji(emoji.clone());
    }

    create.disabled(true)
}

fn disabled_select(menu: &SelectMenu) -> Option<CreateSelectMenu> {
    let custom_id = menu.custom_id.clone()?;

    let kind = match menu.kind {
        ComponentType::StringSelect => CreateSelectMenuKind::String {
            options: menu.options.iter().map(rebuild_option).collect(),
        },
        ComponentType::UserSelect => CreateSelectMenuKind::User {
            default_users: None,
        },
        ComponentType::RoleSelect => CreateSelectMenuKind::Role {
            default_roles: None,
        },
        ComponentType::MentionableSelect => CreateSelectMenuKind::Mentionable {
            default_users: None,
            default_roles: None,
        },
        ComponentType::ChannelSelect => CreateSelectMenuKind::Channel {
            channel_types: None,
            default_channels: None,
        },
        _ => return None,
    };

    let mut create = CreateSelectMenu::new(custom_id, kind).disabled(true);
    if let Some(placeholder) = &menu.placeholder {
        create = create.placeholder(placeholder.clone());
    }
    if let Some(min_values) = menu.min_values {
        create = create.min_values(min_values);
    }
    if let Some(max_values) = menu.max_values {
        create = create.max_values(max_values);
    }

    Some(create)
}

fn rebuild_option(option: &serenity::model::application::SelectMenuOption) -> CreateSelectMenuOption {
    let mut create = CreateSelectMenuOption::new(option.label.clone(), option.value.clone())
        .default_selection(option.default);
    if let Some(description) = &option.description {
        create = create.description(description.clone());
    }
    if let Some(emoji) = &option.emoji {
        create = create.emoji(emoji.clone());
    }
    create
}
