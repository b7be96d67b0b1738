//! Trailer search for a discovered show.

use randomedia_core::Result;

use crate::projection::{ShowInfo, Trailer};
use crate::upstream::youtube::YouTubeItem;
use crate::upstream::YouTubeClient;

#[derive(Clone)]
pub struct TrailerSearch {
    youtube: YouTubeClient,
}

impl TrailerSearch {
    pub fn new(youtube: YouTubeClient) -> Self {
        Self { youtube }
    }

    /// Search query for a show: `"{name} trailer {year}"`, without the year
    /// when it is unknown.
    pub fn query_for(show: &ShowInfo) -> String {
        match show.release_year {
            Some(year) => format!("{} trailer {year}", show.name),
            None => format!("{} trailer", show.name),
        }
    }

    /// Trailers for `show`, in the order the video search returned them.
    pub async fn for_show(&self, show: &ShowInfo) -> Result<Vec<Trailer>> {
        let query = Self::query_for(show);
        let search = self.youtube.search_videos(&query).await?;
        Ok(search
            .items
            .into_iter()
            .map(|item| self.trailer(item))
            .collect())
    }

    fn trailer(&self, item: YouTubeItem) -> Trailer {
        let url = item
            .id
            .video_id
            .as_deref()
            .map(|id| self.youtube.watch_url(id));
        Trailer {
            id: item.id.video_id,
            url,
            title: item.snippet.title,
            channel: item.snippet.channel_title,
            description: item.snippet.description,
        }
    }
}
