//! Form pages
//!
//! Each form is a list of [`FieldSpec`]s; a field's widget decides how its
//! current values from [`FormData`] are drawn. Validation messages are listed
//! under the field they belong to.

use booking_common::validation::{FormData, ValidationErrors, US_STATES};
use booking_common::Genre;

use super::{escape, layout};

/// How a field is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Text,
    TextArea,
    /// Single select over the US state codes
    State,
    /// Multi select over the genre list
    Genres,
    Checkbox,
    Integer,
    DateTime,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
}

const fn field(name: &'static str, label: &'static str, widget: Widget) -> FieldSpec {
    FieldSpec {
        name,
        label,
        widget,
    }
}

pub const VENUE_FIELDS: &[FieldSpec] = &[
    field("name", "Name", Widget::Text),
    field("city", "City", Widget::Text),
    field("state", "State", Widget::State),
    field("address", "Address", Widget::Text),
    field("phone", "Phone", Widget::Text),
    field("image_link", "Image Link", Widget::Text),
    field("genres", "Genres", Widget::Genres),
    field("facebook_link", "Facebook Link", Widget::Text),
    field("website_link", "Website Link", Widget::Text),
    field("seeking_talent", "Seeking Talent", Widget::Checkbox),
    field("seeking_description", "Seeking Description", Widget::TextArea),
];

pub const ARTIST_FIELDS: &[FieldSpec] = &[
    field("name", "Name", Widget::Text),
    field("city", "City", Widget::Text),
    field("state", "State", Widget::State),
    field("phone", "Phone", Widget::Text),
    field("image_link", "Image Link", Widget::Text),
    field("genres", "Genres", Widget::Genres),
    field("facebook_link", "Facebook Link", Widget::Text),
    field("website_link", "Website Link", Widget::Text),
    field("seeking_venue", "Seeking Venue", Widget::Checkbox),
    field("seeking_description", "Seeking Description", Widget::TextArea),
];

pub const SHOW_FIELDS: &[FieldSpec] = &[
    field("artist_id", "Artist ID", Widget::Integer),
    field("venue_id", "Venue ID", Widget::Integer),
    field("start_time", "Start Time", Widget::DateTime),
];

fn option(value: &str, selected: bool) -> String {
    let value = escape(value);
    let selected = if selected { " selected" } else { "" };
    format!(r#"<option value="{value}"{selected}>{value}</option>"#)
}

fn widget(spec: &FieldSpec, values: &FormData) -> String {
    let name = spec.name;
    let value = escape(values.get(name).unwrap_or(""));

    match spec.widget {
        Widget::Text => {
            format!(r#"<input type="text" id="{name}" name="{name}" value="{value}">"#)
        }
        Widget::TextArea => {
            format!(r#"<textarea id="{name}" name="{name}" rows="3">{value}</textarea>"#)
        }
        Widget::Integer => {
            format!(r#"<input type="number" id="{name}" name="{name}" value="{value}">"#)
        }
        Widget::DateTime => format!(
            r#"<input type="text" id="{name}" name="{name}" value="{value}" placeholder="YYYY-MM-DD HH:MM:SS">"#
        ),
        Widget::Checkbox => {
            let checked = if values.checked(name) { " checked" } else { "" };
            format!(r#"<input type="checkbox" id="{name}" name="{name}" value="y"{checked}>"#)
        }
        Widget::State => {
            let current = values.get(name).unwrap_or("");
            let options: String = US_STATES
                .iter()
                .map(|state| option(state, *state == current))
                .collect();
            format!(r#"<select id="{name}" name="{name}">{options}</select>"#)
        }
        Widget::Genres => {
            let current = values.get_all(name);
            let options: String = Genre::ALL
                .iter()
                .map(|genre| option(genre.as_str(), current.contains(&genre.as_str())))
                .collect();
            format!(r#"<select id="{name}" name="{name}" multiple size="6">{options}</select>"#)
        }
    }
}

fn field_errors(spec: &FieldSpec, errors: &ValidationErrors) -> String {
    if !errors.has(spec.name) {
        return String::new();
    }
    let items: String = errors
        .for_field(spec.name)
        .map(|e| format!("<li>{}</li>", escape(&e.to_string())))
        .collect();
    format!(r#"<ul class="errors">{items}</ul>"#)
}

/// Draw a form posting to `action`
pub fn render_form(
    action: &str,
    submit: &str,
    fields: &[FieldSpec],
    values: &FormData,
    errors: &ValidationErrors,
) -> String {
    let body: String = fields
        .iter()
        .map(|spec| {
            format!(
                r#"<div class="field"><label for="{name}">{label}</label>{widget}{errors}</div>"#,
                name = spec.name,
                label = spec.label,
                widget = widget(spec, values),
                errors = field_errors(spec, errors),
            )
        })
        .collect();

    format!(
        r#"<form method="post" action="{action}">{body}<input type="submit" class="button" value="{submit}"></form>"#,
        action = escape(action),
        body = body,
        submit = escape(submit),
    )
}

fn form_page(heading: &str, form: String) -> String {
    layout(heading, None, &format!("<h1>{}</h1>{}", escape(heading), form))
}

pub fn new_venue(values: &FormData, errors: &ValidationErrors) -> String {
    form_page(
        "List a new venue",
        render_form("/venues/create", "Create Venue", VENUE_FIELDS, values, errors),
    )
}

pub fn edit_venue(id: i64, values: &FormData, errors: &ValidationErrors) -> String {
    form_page(
        &format!("Edit venue {}", values.text("name")),
        render_form(&format!("/venues/{}/edit", id), "Edit Venue", VENUE_FIELDS, values, errors),
    )
}

pub fn new_artist(values: &FormData, errors: &ValidationErrors) -> String {
    form_page(
        "List a new artist",
        render_form("/artists/create", "Create Artist", ARTIST_FIELDS, values, errors),
    )
}

pub fn edit_artist(id: i64, values: &FormData, errors: &ValidationErrors) -> String {
    form_page(
        &format!("Edit artist {}", values.text("name")),
        render_form(&format!("/artists/{}/edit", id), "Edit Artist", ARTIST_FIELDS, values, errors),
    )
}

pub fn new_show(values: &FormData, errors: &ValidationErrors) -> String {
    form_page(
        "List a new show",
        render_form("/shows/create", "Create Show", SHOW_FIELDS, values, errors),
    )
}
