use maud::{html, Markup};

/// One-line status banner driven by the `?notice=` query parameter that
/// post-redirect targets carry.
pub fn notice(code: &str) -> Markup {
    let (class, message) = match code {
        "created" => ("success", "Quiz created successfully."),
        "updated" => ("success", "Quiz edited successfully."),
        "deleted" => ("success", "Quiz deleted successfully."),
        "tip_created" => ("success", "Tip created successfully."),
        "tip_accepted" => ("success", "Tip accepted successfully."),
        "tip_updated" => ("success", "Tip edited successfully."),
        "tip_deleted" => ("success", "Tip deleted successfully."),
        "tip_empty" => ("error", "Tip text must not be empty."),
        _ => return html! {},
    };

    html! {
        aside.(format!("notice-{class}")) { (message) }
    }
}

/// Numbered page links for a paginated listing, keeping the search query
/// intact across pages.
pub fn pagination(count: i64, items_per_page: i64, pageno: i64, base: &str, search: &str) -> Markup {
    let pages = (count as u64).div_ceil(items_per_page as u64) as i64;
    if pages <= 1 {
        return html! {};
    }

    // Spaces are the only character the search form produces that needs
    // escaping in a query string.
    let search = search.replace(' ', "+");
    let href = |page: i64| {
        if search.is_empty() {
            format!("{base}?pageno={page}")
        } else {
            format!("{base}?pageno={page}&search={search}")
        }
    };

    html! {
        nav."pagination" {
            ul {
                @for page in 1..=pages {
                    li {
                        @if page == pageno {
                            strong { (page) }
                        } @else {
                            a href=(href(page)) { (page) }
                        }
                    }
                }
            }
        }
    }
}
