//! Listing, detail and search pages

use booking_common::aggregate::Area;
use booking_common::db::{Artist, ShowListing, Venue};
use booking_common::schedule::{Schedule, ShowEntry};
use booking_common::search::{Named, SearchResults};
use booking_common::{time, EntityKind, Genre};

use super::{escape, layout, link_or_dash, Notice};

/// URL prefix of an entity's pages
fn base_path(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Venue => "/venues",
        EntityKind::Artist => "/artists",
        EntityKind::Show => "/shows",
    }
}

fn search_box(kind: EntityKind) -> String {
    let placeholder = match kind {
        EntityKind::Artist => "Find an artist",
        _ => "Find a venue",
    };
    format!(
        r#"<form class="search" method="post" action="{}/search">
            <input type="text" name="search_term" placeholder="{}">
            <input type="submit" class="button" value="Search">
        </form>"#,
        base_path(kind),
        placeholder
    )
}

fn upcoming_label(count: usize) -> String {
    format!(r#"<span class="muted">{} upcoming shows</span>"#, count)
}

pub fn home(notice: Option<&Notice>) -> String {
    layout(
        "Home",
        notice,
        r#"<h1>Booking</h1>
        <p>Find venues and artists, and list the shows that bring them together.</p>
        <p>
            <a class="button" href="/venues/create">Post a venue</a>
            <a class="button" href="/artists/create">Post an artist</a>
            <a class="button" href="/shows/create">Post a show</a>
        </p>"#,
    )
}

pub fn venue_list(areas: &[Area]) -> String {
    let mut content = search_box(EntityKind::Venue);

    if areas.is_empty() {
        content.push_str(r#"<p class="muted">No venues listed yet.</p>"#);
    }

    for area in areas {
        content.push_str(&format!("<h2>{}, {}</h2>", escape(&area.city), escape(&area.state)));
        content.push_str(r#"<ul class="items">"#);
        for venue in &area.venues {
            content.push_str(&format!(
                r#"<li><a href="/venues/{}">{}</a> {}</li>"#,
                venue.id,
                escape(&venue.name),
                upcoming_label(venue.num_upcoming_shows)
            ));
        }
        content.push_str("</ul>");
    }

    layout("Venues", None, &content)
}

pub fn artist_list(artists: &[Artist]) -> String {
    let items: String = artists
        .iter()
        .map(|a| format!(r#"<li><a href="/artists/{}">{}</a></li>"#, a.id, escape(&a.name)))
        .collect();

    layout(
        "Artists",
        None,
        &format!(
            r#"{}<h1>Artists</h1><ul class="items">{}</ul>"#,
            search_box(EntityKind::Artist),
            items
        ),
    )
}

pub fn search_results<T: Named>(kind: EntityKind, term: &str, results: &SearchResults<T>) -> String {
    let prefix = base_path(kind);
    let items: String = results
        .data
        .iter()
        .map(|row| {
            format!(
                r#"<li><a href="{}/{}">{}</a> {}</li>"#,
                prefix,
                row.id(),
                escape(row.name()),
                upcoming_label(row.num_upcoming_shows())
            )
        })
        .collect();

    layout(
        "Search",
        None,
        &format!(
            r#"{}<h2>Number of search results for "{}": {}</h2><ul class="items">{}</ul>"#,
            search_box(kind),
            escape(term.trim()),
            results.count,
            items
        ),
    )
}

fn genre_tags(genres: &[Genre]) -> String {
    let tags: String = genres
        .iter()
        .map(|g| format!("<span>{}</span>", escape(g.as_str())))
        .collect();
    format!(r#"<p class="genres">{}</p>"#, tags)
}

fn seeking(flag: bool, wanted: &str, description: Option<&str>) -> String {
    if flag {
        format!(
            r#"<div class="seeking"><strong>Currently seeking {}</strong><p>{}</p></div>"#,
            wanted,
            escape(description.unwrap_or(""))
        )
    } else {
        format!(r#"<p class="muted">Not currently seeking {}</p>"#, wanted)
    }
}

fn image(link: Option<&str>, alt: &str) -> String {
    match link {
        Some(src) if !src.is_empty() => {
            format!(r#"<img src="{}" alt="{}">"#, escape(src), escape(alt))
        }
        _ => String::new(),
    }
}

/// One side of a schedule; `counterpart` is the page linking the other end
fn show_cards(heading: &str, entries: &[ShowEntry], counterpart: EntityKind) -> String {
    let cards: String = entries
        .iter()
        .map(|e| {
            format!(
                r#"<div class="show-card">{}<a href="{}/{}">{}</a><p class="muted">{}</p></div>"#,
                image(e.counterpart_image_link.as_deref(), &e.counterpart_name),
                base_path(counterpart),
                e.counterpart_id,
                escape(&e.counterpart_name),
                escape(&e.start_time_display)
            )
        })
        .collect();

    format!(
        r#"<h2>{} {}</h2><div class="shows">{}</div>"#,
        entries.len(),
        heading,
        cards
    )
}

fn schedule_sections(schedule: &Schedule, counterpart: EntityKind) -> String {
    format!(
        "{}{}",
        show_cards("Upcoming Shows", &schedule.upcoming, counterpart),
        show_cards("Past Shows", &schedule.past, counterpart)
    )
}

pub fn venue_detail(venue: &Venue, schedule: &Schedule, notice: Option<&Notice>) -> String {
    let content = format!(
        r#"<div class="profile">
            <h1>{name}</h1>
            <p class="muted">ID: {id}</p>
            {genres}
            <p>{address}</p>
            <p>{city}, {state}</p>
            <p>{phone}</p>
            <p>{website}</p>
            <p>{facebook}</p>
            {seeking}
            {image}
        </div>
        <p>
            <a class="button" href="/venues/{id}/edit">Edit</a>
            <form method="post" action="/venues/{id}/delete" style="display:inline">
                <input type="submit" class="button button-danger" value="Delete">
            </form>
        </p>
        {shows}"#,
        name = escape(&venue.name),
        id = venue.id,
        genres = genre_tags(&venue.genres),
        address = escape(&venue.address),
        city = escape(&venue.city),
        state = escape(&venue.state),
        phone = escape(venue.phone.as_deref().unwrap_or("")),
        website = link_or_dash(venue.website.as_deref()),
        facebook = link_or_dash(venue.facebook_link.as_deref()),
        seeking = seeking(venue.seeking_talent, "talent", venue.seeking_description.as_deref()),
        image = image(venue.image_link.as_deref(), &venue.name),
        shows = schedule_sections(schedule, EntityKind::Artist),
    );

    layout(&venue.name, notice, &content)
}

pub fn artist_detail(artist: &Artist, schedule: &Schedule, notice: Option<&Notice>) -> String {
    let content = format!(
        r#"<div class="profile">
            <h1>{name}</h1>
            <p class="muted">ID: {id}</p>
            {genres}
            <p>{city}, {state}</p>
            <p>{phone}</p>
            <p>{website}</p>
            <p>{facebook}</p>
            {seeking}
            {image}
        </div>
        <p><a class="button" href="/artists/{id}/edit">Edit</a></p>
        {shows}"#,
        name = escape(&artist.name),
        id = artist.id,
        genres = genre_tags(&artist.genres),
        city = escape(&artist.city),
        state = escape(&artist.state),
        phone = escape(artist.phone.as_deref().unwrap_or("")),
        website = link_or_dash(artist.website.as_deref()),
        facebook = link_or_dash(artist.facebook_link.as_deref()),
        seeking = seeking(artist.seeking_venue, "performance venues", artist.seeking_description.as_deref()),
        image = image(artist.image_link.as_deref(), &artist.name),
        shows = schedule_sections(schedule, EntityKind::Venue),
    );

    layout(&artist.name, notice, &content)
}

pub fn show_list(shows: &[ShowListing]) -> String {
    let cards: String = shows
        .iter()
        .map(|s| {
            format!(
                r#"<div class="show-card">{image}<a href="/artists/{artist_id}">{artist}</a>
                <p>playing at <a href="/venues/{venue_id}">{venue}</a></p>
                <p class="muted">{start}</p></div>"#,
                image = image(s.artist_image_link.as_deref(), &s.artist_name),
                artist_id = s.artist_id,
                artist = escape(&s.artist_name),
                venue_id = s.venue_id,
                venue = escape(&s.venue_name),
                start = time::format_plain(&s.start_time),
            )
        })
        .collect();

    layout(
        "Shows",
        None,
        &format!(r#"<h1>Shows</h1><div class="shows">{}</div>"#, cards),
    )
}
