//! Git version-control integration (V2): config, commits, deploys.

use crate::errors::ThoughtSpotResult;
use crate::v2::V2Client;
use serde_json::{json, Value};

/// VCS endpoints (`vcs/git/...`).
pub struct VcsService<'a> {
    client: &'a V2Client,
}

impl<'a> VcsService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Searches git configurations.
    pub async fn config_search(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("vcs/git/config/search", request).await
    }

    /// Creates a git configuration.
    pub async fn config_create(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("vcs/git/config/create", request).await
    }

    /// Updates a git configuration.
    pub async fn config_update(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("vcs/git/config/update", request).await
    }

    /// Deletes a git configuration.
    pub async fn config_delete(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("vcs/git/config/delete", request).await
    }

    /// Searches commits.
    pub async fn commits_search(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("vcs/git/commits/search", request).await
    }

    /// Pulls a branch.
    pub async fn branches_pull(&self, branch_name: &str) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(
                &format!("vcs/git/branches/{branch_name}/pull"),
                json!({ "branch_name": branch_name }),
            )
            .await
    }

    /// Commits objects to a branch.
    pub async fn branches_commit(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("vcs/git/branches/commit", request).await
    }

    /// Reverts a commit.
    pub async fn commits_revert(
        &self,
        commit_id: &str,
        request: Value,
    ) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(&format!("vcs/git/commits/{commit_id}/revert"), request)
            .await
    }

    /// Validates objects between two branches.
    pub async fn branches_validate(
        &self,
        source_branch_name: &str,
        target_branch_name: &str,
    ) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(
                "vcs/git/branches/validate",
                json!({
                    "source_branch_name": source_branch_name,
                    "target_branch_name": target_branch_name,
                }),
            )
            .await
    }

    /// Deploys commits to an environment.
    pub async fn commits_deploy(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("vcs/git/commits/deploy", request).await
    }
}
