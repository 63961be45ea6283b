use crate::domain::SanitizedMessage;
use crate::ports::Result;
use crate::utils::parse_timestamp;
use tracing::debug;

/// Orders messages by `created_at`, earliest first.
///
/// Every timestamp is parsed before anything moves, so an unparsable value fails the
/// whole sort. Equal timestamps keep their input order.
pub fn sort_messages(messages: Vec<SanitizedMessage>) -> Result<Vec<SanitizedMessage>> {
    let mut keyed = messages
        .into_iter()
        .map(|message| Ok((parse_timestamp(&message.created_at)?.instant(), message)))
        .collect::<Result<Vec<_>>>()?;

    // Vec::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));

    debug!(count = keyed.len(), "sorted messages");
    Ok(keyed.into_iter().map(|(_, message)| message).collect())
}
