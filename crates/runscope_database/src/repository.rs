//! Data access layer for the monitoring views.

use crate::{BackendConfig, DatabaseResult, Direction, SupabaseClient, TableNames, TableQuery};
use runscope_core::{
    attach_user_names, distinct_user_ids, order_steps, propagate_trigger_message, ChatMessage,
    Run, RunFilter, StepLog, UserProfile,
};
use std::collections::BTreeSet;
use tracing::{debug, error, instrument};

/// Read/delete operations over runs, step logs, chat messages and profiles.
///
/// Every method is one round trip, except [`list_runs`](Self::list_runs) which
/// adds a single batched profile lookup.
#[derive(Debug, Clone)]
pub struct MonitorRepository {
    client: SupabaseClient,
    tables: TableNames,
    chat_message_limit: usize,
}

impl MonitorRepository {
    /// Create a repository over an already constructed client.
    pub fn new(client: SupabaseClient, config: &BackendConfig) -> Self {
        Self {
            client,
            tables: config.tables.clone(),
            chat_message_limit: config.chat_message_limit,
        }
    }

    /// Newest runs first, with owner display names attached.
    ///
    /// A failed profile lookup does not fail the listing; affected runs show
    /// the placeholder name instead.
    #[instrument(skip(self), fields(table = %self.tables.runs))]
    pub async fn list_runs(&self, filter: RunFilter, limit: usize) -> DatabaseResult<Vec<Run>> {
        let mut query = TableQuery::table(&self.tables.runs);
        if filter.flagged_only {
            query = query.eq("is_flagged", true);
        }
        let query = query.order("created_at", Direction::Descending).limit(limit);

        let mut runs: Vec<Run> = self.client.select(&query).await?;
        runs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        runs.truncate(limit);

        let user_ids = distinct_user_ids(&runs);
        let profiles = if user_ids.is_empty() {
            Vec::new()
        } else {
            match self.lookup_profiles(&user_ids).await {
                Ok(profiles) => profiles,
                Err(e) => {
                    error!(error = %e, "Profile lookup failed; using placeholder names");
                    Vec::new()
                }
            }
        };
        attach_user_names(&mut runs, &profiles);

        debug!(count = runs.len(), users = user_ids.len(), "Listed runs");
        Ok(runs)
    }

    /// Fetch the profiles of `user_ids` in one request.
    #[instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    async fn lookup_profiles(&self, user_ids: &BTreeSet<String>) -> DatabaseResult<Vec<UserProfile>> {
        let query = TableQuery::table(&self.tables.user_profiles)
            .select("user_id,name,surname")
            .in_list("user_id", user_ids);
        self.client.select(&query).await
    }

    /// Step logs of one run in step order, each carrying step 1's trigger message.
    #[instrument(skip(self), fields(table = %self.tables.step_logs))]
    pub async fn list_step_logs(&self, run_id: &str) -> DatabaseResult<Vec<StepLog>> {
        let query = TableQuery::table(&self.tables.step_logs)
            .eq("run_id", run_id)
            .order("step_number", Direction::Ascending);

        let mut steps: Vec<StepLog> = self.client.select(&query).await?;
        order_steps(&mut steps);
        propagate_trigger_message(&mut steps);

        debug!(count = steps.len(), "Listed step logs");
        Ok(steps)
    }

    /// Delete exactly one run row.
    #[instrument(skip(self), fields(table = %self.tables.runs))]
    pub async fn delete_run(&self, run_id: &str) -> DatabaseResult<()> {
        let query = TableQuery::table(&self.tables.runs).eq("id", run_id);
        self.client.delete(&query).await?;
        debug!("Deleted run");
        Ok(())
    }

    /// Every profile, ordered by given name.
    #[instrument(skip(self), fields(table = %self.tables.user_profiles))]
    pub async fn list_user_profiles(&self) -> DatabaseResult<Vec<UserProfile>> {
        let query = TableQuery::table(&self.tables.user_profiles)
            .select("user_id,name,surname")
            .order("name", Direction::Ascending);

        let mut profiles: Vec<UserProfile> = self.client.select(&query).await?;
        // Nulls sort last, as the backend does for ascending order
        profiles.sort_by(|a, b| {
            (a.name.is_none(), &a.name).cmp(&(b.name.is_none(), &b.name))
        });
        profiles.iter_mut().for_each(UserProfile::resolve_display_name);

        debug!(count = profiles.len(), "Listed user profiles");
        Ok(profiles)
    }

    /// A user's chat history, oldest first.
    #[instrument(skip(self), fields(table = %self.tables.chat_messages))]
    pub async fn list_chat_messages(&self, user_id: &str) -> DatabaseResult<Vec<ChatMessage>> {
        let query = TableQuery::table(&self.tables.chat_messages)
            .eq("user_id", user_id)
            .order("created_at", Direction::Ascending)
            .limit(self.chat_message_limit);

        let mut messages: Vec<ChatMessage> = self.client.select(&query).await?;
        messages.sort_by_key(|message| message.created_at);

        debug!(count = messages.len(), "Listed chat messages");
        Ok(messages)
    }
}
