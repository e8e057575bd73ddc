//! Concurrent use of shared keys produces the same results as sequential use.

use std::sync::Arc;

use fieldcrypt::{telemetry, FieldProtector, Token, TokenSet};

const RECORDS: usize = 64;

fn value(i: usize) -> String {
    format!("Customer {i:03} lives at {} Elm Street", 100 + i)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_results_match_sequential() {
    // Exercise the stock subscriber; a second init in the same process errors.
    telemetry::init("warn").unwrap();

    let protector = Arc::new(FieldProtector::new(&[0x5Au8; 32], b"shared-index-key").unwrap());

    let sequential: Vec<(Token, TokenSet)> = (0..RECORDS)
        .map(|i| {
            let v = value(i);
            (protector.digest(&v), protector.tokenize("address", &v))
        })
        .collect();

    let mut handles = Vec::with_capacity(RECORDS);
    for i in 0..RECORDS {
        let protector = Arc::clone(&protector);
        handles.push(tokio::spawn(async move {
            let v = value(i);
            let blob = protector.encrypt_string(&v).unwrap();
            let plain = protector.decrypt_string(blob.as_bytes()).unwrap();
            (i, plain, protector.digest(&v), protector.tokenize("address", &v))
        }));
    }

    for handle in handles {
        let (i, plain, token, tokens) = handle.await.unwrap();
        assert_eq!(plain, value(i));
        assert_eq!(token, sequential[i].0);
        assert_eq!(tokens, sequential[i].1);
    }

    assert!(telemetry::init("warn").is_err());
}

#[test]
fn threads_encrypting_same_value_never_share_a_nonce() {
    let protector = Arc::new(FieldProtector::new(&[0x5Au8; 16], b"shared-index-key").unwrap());

    let blobs: Vec<Vec<u8>> = std::thread::scope(|s| {
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let protector = Arc::clone(&protector);
                s.spawn(move || {
                    (0..32)
                        .map(|_| protector.encrypt_string("same value").unwrap().into_bytes())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        workers
            .into_iter()
            .flat_map(|w| w.join().unwrap())
            .collect()
    });

    let nonces: std::collections::HashSet<&[u8]> =
        blobs.iter().map(|b| &b[..fieldcrypt::NONCE_LEN]).collect();
    assert_eq!(nonces.len(), blobs.len());
    for blob in &blobs {
        assert_eq!(protector.decrypt_string(blob).unwrap(), "same value");
    }
}
