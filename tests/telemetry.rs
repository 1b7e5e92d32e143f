//! Hashing must not touch the global metrics recorder; tuple validation may.

use std::sync::Mutex;

use community_id::{CommunityId, FlowTuple};
use metrics::{Counter, Gauge, Histogram, Key, KeyName, Recorder, SharedString, Unit};

#[derive(Default)]
struct CounterNames {
    names: Mutex<Vec<String>>,
}

impl CounterNames {
    fn count(&self, name: &str) -> usize {
        self.names.lock().unwrap().iter().filter(|n| *n == name).count()
    }
}

impl Recorder for CounterNames {
    fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn register_counter(&self, key: &Key) -> Counter {
        self.names.lock().unwrap().push(key.name().to_owned());
        Counter::noop()
    }

    fn register_gauge(&self, _key: &Key) -> Gauge {
        Gauge::noop()
    }

    fn register_histogram(&self, _key: &Key) -> Histogram {
        Histogram::noop()
    }
}

// Single test in this binary: the recorder is process-global.
#[test]
fn only_validation_registers_counters() {
    let recorder: &'static CounterNames = Box::leak(Box::new(CounterNames::default()));
    metrics::set_recorder(recorder).unwrap();

    let calculator = CommunityId::default();
    let tcp = FlowTuple::tcp("1.2.3.4", "5.6.7.8", 1122, 3344).unwrap();
    let icmp = FlowTuple::icmp("5.6.7.8", "1.2.3.4", 0, 0).unwrap();
    for _ in 0..10 {
        calculator.calc(&tcp);
        calculator.calc(&icmp);
    }
    assert!(recorder.names.lock().unwrap().is_empty());

    FlowTuple::new(46u8, "1.2.3.4", "5.6.7.8", Some(1), Some(2)).unwrap();
    assert_eq!(recorder.count("community_id_ports_ignored_total"), 1);
    assert_eq!(recorder.count("community_id_calculated_total"), 0);
}
