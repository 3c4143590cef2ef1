//! Benchmarks for line parsing and reply serialization.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tinyirc_proto::{Message, MessageRef, Prefix, Response};

const PING: &str = "PING :irc.example.com";
const PRIVMSG: &str = ":nick!user@host PRIVMSG #channel :Hello, world!";
const TAGGED: &str = "@time=2023-01-01T00:00:00.000Z;msgid=abc123 :nick!user@host PRIVMSG #channel :Hello with tags!";
const USER: &str = "USER guest 0 * :Some Real Name";

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Message Parsing");

    for (name, line) in [("ping", PING), ("privmsg", PRIVMSG), ("tagged", TAGGED), ("user", USER)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let msg = MessageRef::parse(black_box(line)).unwrap();
                black_box(msg.arg(0))
            })
        });
    }

    group.finish();
}

fn benchmark_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("Message Serialization");

    let relay = Message::privmsg("#channel", "Hello, world!")
        .with_prefix(Prefix::new("nick", "user", "host"));
    group.bench_function("relay", |b| b.iter(|| black_box(&relay).to_string()));

    let numeric = Response::err_chanoprivsneeded("nick", "#channel")
        .with_prefix(Prefix::ServerName("irc.example.com".into()));
    group.bench_function("numeric", |b| b.iter(|| black_box(&numeric).to_string()));

    group.finish();
}

criterion_group!(benches, benchmark_parsing, benchmark_serialization);
criterion_main!(benches);
