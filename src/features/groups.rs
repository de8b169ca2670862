//! Groups.

use std::collections::HashSet;

use tracing::debug;

use super::{keys, SocialClient};
use crate::cache::{CacheRecord, StoreName};
use crate::models::Group;
use crate::remote::{RemoteBackend, Result};

/// Group attribute holding the creator's user id.
const CREATED_BY: &str = "created_by";

impl<R: RemoteBackend> SocialClient<R> {
    // == Fetch Groups Created By ==
    /// Groups the user created, sorted by name.
    ///
    /// Groups are cached one record per group and read back through the
    /// `created_by` index. A marker record lists the ids of the last fetch;
    /// the index answer is used only when every listed group is still
    /// cached, so a batch that was partly written is refetched.
    pub async fn fetch_groups_created_by(&self, user_id: &str) -> Result<Vec<Group>> {
        let marker = keys::groups_created_by(user_id);
        if let Some(ids) = self
            .cache
            .get::<Vec<String>>(StoreName::Groups, &marker)
            .await
        {
            let mut cached: Vec<Group> = self
                .cache
                .get_by_index(StoreName::Groups, CREATED_BY, user_id)
                .await;
            cached.retain(|group| ids.contains(&group.id));
            let found: HashSet<&str> = cached.iter().map(|group| group.id.as_str()).collect();
            if ids.iter().all(|id| found.contains(id.as_str())) {
                cached.sort_by(|a, b| a.name.cmp(&b.name));
                return Ok(cached);
            }
            debug!(user_id, "Cached groups incomplete, refetching");
        }

        let mut groups = self.remote.fetch_groups_created_by(user_id).await?;
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        let records: Vec<_> = groups
            .iter()
            .map(|group| CacheRecord::new(group.id.clone(), group))
            .collect();
        self.cache.put_many(StoreName::Groups, records).await;

        let ids: Vec<&str> = groups.iter().map(|group| group.id.as_str()).collect();
        self.cache
            .put(StoreName::Groups, CacheRecord::new(marker, ids))
            .await;
        Ok(groups)
    }
}
