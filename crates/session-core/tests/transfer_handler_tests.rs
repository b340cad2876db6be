//! Tests for TransferHandler in session-core

use rvoip_session_core::coordinator::transfer::ReferSubscription;
use rvoip_session_core::api::types::{SessionId, CallState};
use rvoip_dialog_core::DialogId;
use rvoip_dialog_core::transaction::TransactionKey;
use rvoip_sip_core::types::refer_to::ReferTo;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use std::collections::HashMap;
use std::time::Duration;

#[tokio::test]
async fn test_refer_subscription_creation() {
    let subscription = ReferSubscription {
        event_id: "refer-123".to_string(),
        dialog_id: DialogId::new(),
        original_session_id: SessionId::new(),
        transfer_session_id: None,
        created_at: std::time::Instant::now(),
    };
    
    assert_eq!(subscription.event_id, "refer-123");
    assert!(subscription.transfer_session_id.is_none());
}

#[tokio::test]
async fn test_refer_subscription_with_transfer_session() {
    let mut subscription = ReferSubscription {
        event_id: "refer-456".to_string(),
        dialog_id: DialogId::new(),
        original_session_id: SessionId::new(),
        transfer_session_id: None,
        created_at: std::time::Instant::now(),
    };
    
    // Update with transfer session ID
    let new_session_id = SessionId::new();
    subscription.transfer_session_id = Some(new_session_id.clone());
    
    assert!(subscription.transfer_session_id.is_some());
    assert_eq!(subscription.transfer_session_id.unwrap(), new_session_id);
}

#[tokio::test]
async fn test_subscription_expiry() {
    use std::time::{Instant, Duration};
    
    // Create an old subscription
    let old_subscription = ReferSubscription {
        event_id: "old-refer".to_string(),
        dialog_id: DialogId::new(),
        original_session_id: SessionId::new(),
        transfer_session_id: None,
        created_at: Instant::now() - Duration::from_secs(400), // 6+ minutes old
    };
    
    // Create a recent subscription
    let recent_subscription = ReferSubscription {
        event_id: "recent-refer".to_string(),
        dialog_id: DialogId::new(),
        original_session_id: SessionId::new(),
        transfer_session_id: None,
        created_at: Instant::now() - Duration::from_secs(100), // Less than 5 minutes
    };
    
    // Test expiry check (5 minute threshold)
    let expiry_duration = Duration::from_secs(300);
    let now = Instant::now();
    
    assert!(now.duration_since(old_subscription.created_at) > expiry_duration);
    assert!(now.duration_since(recent_subscription.created_at) < expiry_duration);
}

#[cfg(test)]
mod transfer_flow_tests {
    use super::*;
    
    #[tokio::test]
    async fn test_unattended_transfer_accepted() {
        // Test that unattended transfer (without Replaces) is accepted
        let refer_to = ReferTo::from_str("sip:target@example.com").unwrap();
        let dialog_id = DialogId::new();
        let transaction_id = TransactionKey::new("transfer-branch".to_string(), rvoip_sip_core::Method::Refer, true);
        
        // In a real test, we'd mock the dependencies and verify the handler
        // processes the request correctly
        
        // For now, just verify the types work together
        assert!(!dialog_id.to_string().is_empty());
        assert!(!transaction_id.to_string().is_empty());
        assert!(refer_to.uri().to_string().contains("target@example.com"));
    }
    
    #[tokio::test] 
    async fn test_attended_transfer_not_implemented() {
        // Test that attended transfer (with Replaces) returns error
        let replaces = Some("call-id=123;to-tag=456;from-tag=789".to_string());
        
        // In the actual implementation, this should return an error
        // indicating attended transfer is not yet implemented
        assert!(replaces.is_some());
        assert!(replaces.unwrap().contains("call-id="));
    }
    
    #[tokio::test]
    async fn test_transfer_states() {
        // Test the various states a transfer can go through
        let states = vec![
            CallState::Initiating,
            CallState::Ringing,
            CallState::Active,
            CallState::Terminated,
            CallState::Failed("Transfer failed".to_string()),
        ];
        
        for state in states {
            match state {
                CallState::Active => {
                    // Transfer succeeded
                    assert!(true);
                }
                CallState::Failed(reason) => {
                    // Transfer failed
                    assert!(reason.contains("failed") || reason.contains("Failed"));
                }
                CallState::Terminated => {
                    // Call ended before transfer completed
                    assert!(true);
                }
                _ => {
                    // Intermediate states
                    assert!(true);
                }
            }
        }
    }
    
    #[tokio::test]
    async fn test_notify_sipfrag_formats() {
        // Test the various SIP fragment bodies used in NOTIFY
        let sipfrag_bodies = vec![
            ("trying", "SIP/2.0 100 Trying\r\n"),
            ("ringing", "SIP/2.0 180 Ringing\r\n"),
            ("success", "SIP/2.0 200 OK\r\n"),
            ("failure", "SIP/2.0 503 Service Unavailable\r\n"),
            ("timeout", "SIP/2.0 408 Request Timeout\r\n"),
            ("terminated", "SIP/2.0 487 Request Terminated\r\n"),
        ];
        
        for (state, body) in sipfrag_bodies {
            assert!(body.starts_with("SIP/2.0"));
            assert!(body.ends_with("\r\n"));
            
            // Verify status codes match expected ranges
            if state == "trying" {
                assert!(body.contains("100"));
            } else if state == "ringing" {
                assert!(body.contains("180"));
            } else if state == "success" {
                assert!(body.contains("200"));
            }
        }
    }
    
    #[tokio::test]
    async fn test_subscription_state_headers() {
        // Test subscription state values used in NOTIFY
        let active_state = "active;expires=60";
        let terminated_state = "terminated;reason=noresource";
        
        assert!(active_state.starts_with("active"));
        assert!(active_state.contains("expires="));
        
        assert!(terminated_state.starts_with("terminated"));
        assert!(terminated_state.contains("reason="));
    }
    
    #[tokio::test]
    async fn test_event_id_generation() {
        // Test that event IDs are unique
        let mut event_ids = Vec::new();
        
        for _ in 0..10 {
            let event_id = format!("refer-{}", uuid::Uuid::new_v4());
            assert!(event_id.starts_with("refer-"));
            assert!(!event_ids.contains(&event_id));
            event_ids.push(event_id);
        }
        
        assert_eq!(event_ids.len(), 10);
    }
}

#[cfg(test)]
mod cleanup_tests {
    use super::*;
    use std::time::{Instant, Duration};
    
    #[tokio::test]
    async fn test_subscription_cleanup() {
        let mut subscriptions: HashMap<String, ReferSubscription> = HashMap::new();
        
        // Add old and new subscriptions
        subscriptions.insert("old-1".to_string(), ReferSubscription {
            event_id: "old-1".to_string(),
            dialog_id: DialogId::new(),
            original_session_id: SessionId::new(),
            transfer_session_id: None,
            created_at: Instant::now() - Duration::from_secs(400),
        });
        
        subscriptions.insert("new-1".to_string(), ReferSubscription {
            event_id: "new-1".to_string(),
            dialog_id: DialogId::new(),
            original_session_id: SessionId::new(),
            transfer_session_id: None,
            created_at: Instant::now(),
        });
        
        // Simulate cleanup
        let now = Instant::now();
        let expiry = Duration::from_secs(300);
        
        subscriptions.retain(|_, sub| {
            now.duration_since(sub.created_at) < expiry
        });
        
        // Only new subscription should remain
        assert_eq!(subscriptions.len(), 1);
        assert!(subscriptions.contains_key("new-1"));
        assert!(!subscriptions.contains_key("old-1"));
    }
}

#[cfg(test)]
mod monitoring_tests {
    use super::*;
    
    #[tokio::test]
    async fn test_transfer_monitor_timeout() {
        // Test that monitor has appropriate timeout
        let max_attempts = 30;
        let sleep_duration = Duration::from_secs(1);
        let total_timeout = max_attempts as u64 * sleep_duration.as_secs();
        
        assert_eq!(total_timeout, 30);
    }
    
    #[tokio::test]
    async fn test_transfer_progress_states() {
        // Test the progression of states during transfer
        let progression = vec![
            (CallState::Initiating, "SIP/2.0 100 Trying\r\n", false),
            (CallState::Ringing, "SIP/2.0 180 Ringing\r\n", false),
            (CallState::Active, "SIP/2.0 200 OK\r\n", true),
        ];
        
        for (state, expected_sipfrag, should_terminate) in progression {
            match state {
                CallState::Initiating => {
                    assert!(expected_sipfrag.contains("100"));
                    assert!(!should_terminate);
                }
                CallState::Ringing => {
                    assert!(expected_sipfrag.contains("180"));
                    assert!(!should_terminate);
                }
                CallState::Active => {
                    assert!(expected_sipfrag.contains("200"));
                    assert!(should_terminate);
                }
                _ => {}
            }
        }
    }
}