//! Onboarding message templates.

use crate::egress::{Block, OutboundMessage};

pub const DEFAULT_WELCOME_CHANNEL: &str = "C022WC9572N";
pub const DEFAULT_VIDEO_CHANNEL: &str = "C069VM8QFLN";

pub const VIDEO_FALLBACK_TEXT: &str = "Helpful onboarding videos";

/// Title and link for each onboarding video, in playlist order.
pub const ONBOARDING_VIDEOS: [(&str, &str); 4] = [
    ("Welcome & Introduction", "https://youtu.be/ZA7Js3Ibsk0"),
    ("Profile Setup", "https://youtu.be/bvIUaSUdTGE"),
    ("Getting Showcased", "https://youtu.be/vod8x79CVVQ"),
    ("Team Collaboration", "https://youtu.be/hZ7_uf5iyCg"),
];

const ONBOARDING_STEPS: [&str; 8] = [
    "Include your headshot :busts_in_silhouette: and your marketing superpower :mechanical_arm:.",
    "Participate in the LIVE Tuesday Broadcast at 8 am PT / 11 am ET.",
    "Watch the Giver Marketing Blueprint in #general.",
    "Add your scheduler in #schedulers.",
    "Start weekly 1:1s.",
    "Want to be a guest speaker? Click the arrow!",
    "Check membership videos in #member-success.",
    "Share your origin story in #general.",
];

fn mention(user_id: &str) -> String {
    format!("<@{user_id}>")
}

/// Full onboarding DM sent when a member joins.
pub fn onboarding_dm(user_id: &str) -> OutboundMessage {
    let mut text = format!(
        "\n:wave: *Welcome {}!* Let’s help you get started and connect with other members.\n",
        mention(user_id)
    );
    for step in ONBOARDING_STEPS {
        text.push_str("• ");
        text.push_str(step);
        text.push('\n');
    }
    OutboundMessage::text(user_id, text)
}

/// Public announcement posted alongside the onboarding DM.
pub fn join_announcement(channel: &str, user_id: &str) -> OutboundMessage {
    OutboundMessage::text(
        channel,
        format!(":tada: Please welcome {} to the community!", mention(user_id)),
    )
}

/// Short welcome DM sent from the control panel.
pub fn manual_welcome(user_id: &str) -> OutboundMessage {
    OutboundMessage::text(user_id, format!(":wave: *Welcome {}!* …", mention(user_id)))
}

pub fn channel_welcome(channel: &str, user_id: &str) -> OutboundMessage {
    OutboundMessage::text(channel, format!(":tada: Please welcome {}!", mention(user_id)))
}

/// The numbered video playlist, one section block per video.
pub fn onboarding_videos(channel: &str) -> OutboundMessage {
    let blocks = ONBOARDING_VIDEOS
        .iter()
        .enumerate()
        .map(|(idx, (title, url))| {
            Block::mrkdwn_section(format!("{}. *{title}*:\n<{url}|Watch here>", idx + 1))
        })
        .collect();
    OutboundMessage::text(channel, VIDEO_FALLBACK_TEXT).with_blocks(blocks)
}
