//! Messaging stack: topics, queues, and their subscriptions.

use crate::context::{Context, MessagingCapability};
use crate::error::AssemblyError;
use crate::stack::set_default_tags;
use crate::synth::handles::{QueueHandle, TopicHandle};
use crate::synth::{Assembly, StackBuilder};
use serde_json::json;
use std::collections::BTreeMap;

/// Application event topic.
pub const TOPIC_APPLICATION: &str = "application";

/// Notifications delivery queue.
pub const QUEUE_NOTIFICATIONS: &str = "notifications";

#[derive(Debug)]
pub struct MessagingStack {
    topics: BTreeMap<String, TopicHandle>,
    queues: BTreeMap<String, QueueHandle>,
}

impl MessagingStack {
    pub fn build(ctx: &mut Context, assembly: &mut Assembly) -> Result<Self, AssemblyError> {
        let stack_id = ctx.resource_id("message")?;
        let mut builder = StackBuilder::new(
            stack_id,
            "Messaging resources: topics, queues, and subscriptions.",
        );
        set_default_tags(&mut builder, ctx);

        /* Topics */

        let topic_construct_id = ctx.resource_id("topic-application")?;
        let topic_name = ctx.resource_name(TOPIC_APPLICATION)?;
        builder.resource(
            &topic_construct_id,
            "messaging/topic",
            json!({ "name": topic_name }),
        )?;

        /* Queues */

        let queue_construct_id = ctx.resource_id("queue-notifications")?;
        let queue_name = ctx.resource_name("queue-ns")?;
        builder.resource(
            &queue_construct_id,
            "messaging/queue",
            json!({ "name": queue_name }),
        )?;

        /* Subscriptions */

        builder.resource(
            &ctx.resource_id("subscription-application-api")?,
            "messaging/subscription",
            json!({
                "topic": topic_name,
                "endpoint": queue_name,
                "filter_policy": {
                    "op_code": { "allowlist": ["USER_CREATED", "USER_PASSWORD_RESET"] },
                },
            }),
        )?;

        assembly.add_stack(builder.build());

        let mut topics = BTreeMap::new();
        topics.insert(
            TOPIC_APPLICATION.to_string(),
            TopicHandle {
                construct_id: topic_construct_id,
                name: topic_name,
            },
        );
        let mut queues = BTreeMap::new();
        queues.insert(
            QUEUE_NOTIFICATIONS.to_string(),
            QueueHandle {
                construct_id: queue_construct_id,
                name: queue_name,
            },
        );
        Ok(Self { topics, queues })
    }
}

impl MessagingCapability for MessagingStack {
    fn topic(&self, key: &str) -> Option<&TopicHandle> {
        self.topics.get(key)
    }

    fn queue(&self, key: &str) -> Option<&QueueHandle> {
        self.queues.get(key)
    }
}
