/// A message as handed out by a receive call. The receipt handle identifies
/// this particular delivery and is what delete_message consumes.
#[derive(Debug, Clone)]
pub struct QueueMessage {
    pub message_id: String,
    pub receipt_handle: String,
    pub body: String,
}
