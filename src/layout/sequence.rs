use super::*;

pub(crate) const PARTICIPANT_Y: f32 = 80.0;
const LIFELINE_OFFSET: f32 = 50.0;
const FIRST_MESSAGE_Y: f32 = 160.0;
const MESSAGE_SPACING: f32 = 60.0;
const LIFELINE_TAIL: f32 = 40.0;
const BOTTOM_MARGIN: f32 = 40.0;

/// Spreads participants evenly across the width and gives each message its
/// own row below the headers. The canvas grows to fit every row.
pub fn compute_sequence_layout(
    participants: &[Participant],
    messages: &[Message],
    width: f32,
    height: f32,
) -> SequenceLayout {
    let spacing = width / (participants.len() + 1) as f32;
    let lifeline_end =
        FIRST_MESSAGE_Y + messages.len() as f32 * MESSAGE_SPACING + LIFELINE_TAIL;

    let mut lane_x: HashMap<&str, f32> = HashMap::new();
    let mut lanes = Vec::with_capacity(participants.len());
    let mut lifelines = Vec::with_capacity(participants.len());
    for (idx, participant) in participants.iter().enumerate() {
        let x = spacing * (idx + 1) as f32;
        lane_x.insert(participant.id.as_str(), x);
        lanes.push(LaneLayout {
            id: participant.id.clone(),
            name: participant.display_name().to_string(),
            kind: participant.kind,
            x,
            y: PARTICIPANT_Y,
        });
        lifelines.push(Lifeline {
            id: participant.id.clone(),
            x,
            y1: PARTICIPANT_Y + LIFELINE_OFFSET,
            y2: lifeline_end,
        });
    }

    let rows = messages
        .iter()
        .enumerate()
        .map(|(index, message)| {
            let from_x = lane_x.get(message.from.as_str()).copied().unwrap_or(0.0);
            let to_x = lane_x.get(message.to.as_str()).copied().unwrap_or(from_x);
            MessageLayout {
                index,
                kind: message.kind,
                text: message.text.clone(),
                note: message.note.clone(),
                from_x,
                to_x,
                y: FIRST_MESSAGE_Y + index as f32 * MESSAGE_SPACING,
                is_self: message.is_self(),
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        lanes = lanes.len(),
        rows = rows.len(),
        "sequence layout"
    );

    SequenceLayout {
        width,
        height: height.max(lifeline_end + BOTTOM_MARGIN),
        lanes,
        lifelines,
        messages: rows,
    }
}
