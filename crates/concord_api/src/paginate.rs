//! Forward pagination over ranged endpoints.

use crate::{GuildRange, MAX_GUILD_PAGE, RestApi};
use concord_core::{Guild, Member, Snowflake};
use concord_error::ConcordResult;
use std::future::Future;
use tracing::{debug, instrument, trace};

/// An entity that can serve as a pagination cursor.
pub trait Paginated {
    /// The ID the next page starts after.
    fn cursor(&self) -> Snowflake;
}

impl Paginated for Guild {
    fn cursor(&self) -> Snowflake {
        self.id
    }
}

impl Paginated for Member {
    fn cursor(&self) -> Snowflake {
        self.user.id
    }
}

/// Collect up to `max` entities by walking pages forward.
///
/// `fetch_page` receives the cursor (`None` for the first page) and the number of
/// entities to request, which is `min(page_size, remaining)`. The walk ends once `max`
/// entities are collected or a page comes back shorter than requested. A failing page
/// aborts the walk and its error is returned; nothing collected so far is kept.
///
/// A `page_size` of zero means [`MAX_GUILD_PAGE`]; larger sizes are clamped to it.
///
/// # Example
///
/// ```
/// use concord_api::walk_forward;
/// use concord_core::Guild;
///
/// # async fn example() -> concord_error::ConcordResult<()> {
/// let all: Vec<Guild> = (1..=5u64).map(|id| Guild::new(id, "g", 1u64)).collect();
///
/// let found = walk_forward(10, 2, |after, limit| {
///     let page: Vec<Guild> = all
///         .iter()
///         .filter(|g| after.is_none_or(|after| g.id > after))
///         .take(limit)
///         .cloned()
///         .collect();
///     async move { Ok(page) }
/// })
/// .await?;
///
/// assert_eq!(found.len(), 5);
/// # Ok(())
/// # }
/// ```
pub async fn walk_forward<T, F, Fut>(
    max: usize,
    page_size: usize,
    mut fetch_page: F,
) -> ConcordResult<Vec<T>>
where
    T: Paginated,
    F: FnMut(Option<Snowflake>, usize) -> Fut,
    Fut: Future<Output = ConcordResult<Vec<T>>>,
{
    let page_size = match page_size {
        0 => MAX_GUILD_PAGE,
        n => n.min(MAX_GUILD_PAGE),
    };

    let mut collected = Vec::new();
    let mut cursor = None;

    while collected.len() < max {
        let requested = page_size.min(max - collected.len());
        let page = fetch_page(cursor, requested).await?;
        let received = page.len();
        trace!(?cursor, requested, received, "Fetched page");

        if let Some(last) = page.last() {
            cursor = Some(last.cursor());
        }
        collected.extend(page);

        if received < requested {
            break;
        }
    }

    collected.truncate(max);
    Ok(collected)
}

/// Enumerate up to `max` guilds of the current user.
#[instrument(skip(api))]
pub async fn guilds(api: &dyn RestApi, max: usize) -> ConcordResult<Vec<Guild>> {
    let guilds = walk_forward(max, MAX_GUILD_PAGE, move |after, limit| {
        let range = match after {
            Some(id) => GuildRange::after(id, limit),
            None => GuildRange::new(limit),
        };
        api.guilds_range(range)
    })
    .await?;

    debug!(count = guilds.len(), "Enumerated guilds");
    Ok(guilds)
}
