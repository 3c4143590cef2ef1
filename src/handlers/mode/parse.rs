//! Channel modestring parsing and rendering.

use crate::error::HandlerError;
use crate::state::{ModeChange, ModeRequest};

/// Parse a channel modestring and its arguments into requests.
///
/// Nothing is applied here, so a bad character or a missing argument
/// rejects the whole command. `+k` with an unusable key and `+l` with a
/// non-positive or non-numeric limit consume their argument and are skipped.
pub fn parse_channel_modes(
    channel: &str,
    modestring: &str,
    args: &[&str],
) -> Result<Vec<ModeRequest>, HandlerError> {
    let mut args = args.iter().copied();
    let mut grant = true;
    let mut requests = Vec::new();

    for mode in modestring.chars() {
        match mode {
            '+' => grant = true,
            '-' => grant = false,
            'i' => requests.push(ModeRequest::Flag(ModeChange::InviteOnly(grant))),
            't' => requests.push(ModeRequest::Flag(ModeChange::TopicLock(grant))),
            'k' if grant => {
                let key = args.next().ok_or(HandlerError::NeedMoreParams)?;
                if !key.is_empty() && !key.contains(' ') {
                    requests.push(ModeRequest::Flag(ModeChange::Key(Some(key.to_string()))));
                }
            }
            'k' => requests.push(ModeRequest::Flag(ModeChange::Key(None))),
            'l' if grant => {
                let limit = args.next().ok_or(HandlerError::NeedMoreParams)?;
                if let Ok(limit) = limit.parse::<usize>()
                    && limit > 0
                {
                    requests.push(ModeRequest::Flag(ModeChange::Limit(Some(limit))));
                }
            }
            'l' => requests.push(ModeRequest::Flag(ModeChange::Limit(None))),
            'o' => {
                let nick = args.next().ok_or(HandlerError::NeedMoreParams)?;
                requests.push(ModeRequest::Operator {
                    grant,
                    nick: nick.to_string(),
                });
            }
            other => {
                return Err(HandlerError::UnknownMode {
                    mode: other,
                    channel: channel.to_string(),
                });
            }
        }
    }

    Ok(requests)
}

/// Render applied changes as one modestring plus arguments, emitting a
/// sign only when it changes: `+o-t alice`.
pub fn format_changes(changes: &[ModeChange]) -> (String, Vec<String>) {
    let mut modes = String::new();
    let mut args = Vec::new();
    let mut current = None;

    for change in changes {
        let (grant, letter, arg) = change.describe();
        if current != Some(grant) {
            modes.push(if grant { '+' } else { '-' });
            current = Some(grant);
        }
        modes.push(letter);
        args.extend(arg);
    }

    (modes, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(requests: &[ModeRequest]) -> Vec<ModeChange> {
        requests
            .iter()
            .filter_map(|r| match r {
                ModeRequest::Flag(change) => Some(change.clone()),
                ModeRequest::Operator { .. } => None,
            })
            .collect()
    }

    #[test]
    fn parses_flags_with_sign_state() {
        let requests = parse_channel_modes("#c", "+i-t", &[]).unwrap();
        assert_eq!(
            flags(&requests),
            vec![ModeChange::InviteOnly(true), ModeChange::TopicLock(false)]
        );
    }

    #[test]
    fn key_and_limit_take_arguments_only_when_set() {
        let requests = parse_channel_modes("#c", "+kl-kl", &["secret", "5"]).unwrap();
        assert_eq!(
            flags(&requests),
            vec![
                ModeChange::Key(Some("secret".into())),
                ModeChange::Limit(Some(5)),
                ModeChange::Key(None),
                ModeChange::Limit(None),
            ]
        );
    }

    #[test]
    fn operator_takes_argument_on_both_signs() {
        let requests = parse_channel_modes("#c", "+o-o", &["alice", "bob"]).unwrap();
        assert_eq!(
            requests,
            vec![
                ModeRequest::Operator {
                    grant: true,
                    nick: "alice".into()
                },
                ModeRequest::Operator {
                    grant: false,
                    nick: "bob".into()
                },
            ]
        );
    }

    #[test]
    fn missing_argument_is_need_more_params() {
        assert_eq!(
            parse_channel_modes("#c", "+k", &[]),
            Err(HandlerError::NeedMoreParams)
        );
        assert_eq!(
            parse_channel_modes("#c", "-o", &[]),
            Err(HandlerError::NeedMoreParams)
        );
    }

    #[test]
    fn unknown_mode_names_the_character() {
        assert_eq!(
            parse_channel_modes("#c", "+ix", &[]),
            Err(HandlerError::UnknownMode {
                mode: 'x',
                channel: "#c".into()
            })
        );
    }

    #[test]
    fn bad_limit_is_consumed_and_skipped() {
        let requests = parse_channel_modes("#c", "+lo", &["zero", "alice"]).unwrap();
        assert_eq!(requests.len(), 1);
        let requests = parse_channel_modes("#c", "+l", &["0"]).unwrap();
        assert!(requests.is_empty());
    }

    #[test]
    fn format_groups_signs() {
        let changes = vec![
            ModeChange::Operator {
                grant: true,
                uid: "CAAAAAB".into(),
                nick: "bob".into(),
            },
            ModeChange::Limit(Some(10)),
            ModeChange::TopicLock(false),
        ];
        assert_eq!(
            format_changes(&changes),
            ("+ol-t".to_string(), vec!["bob".to_string(), "10".to_string()])
        );
    }
}
