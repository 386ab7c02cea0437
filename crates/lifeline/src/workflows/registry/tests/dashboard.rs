use super::common::*;
use crate::workflows::registry::{BloodType, DonorRegistration, RequestStatus, Urgency};

fn register_all(service: &MemoryRegistry, forms: Vec<DonorRegistration>) {
    for form in forms {
        service.register_donor(form).expect("registers");
    }
}

#[test]
fn empty_registry_produces_zeroed_dashboard() {
    let stats = build_service().dashboard().expect("dashboard");

    assert_eq!(stats.total_donors, 0);
    assert_eq!(stats.available_donors, 0);
    assert_eq!(stats.active_requests, 0);
    assert_eq!(stats.total_donations, 0);
    assert!(stats.donors_by_blood_type.is_empty());
    assert!(stats.recent_requests.is_empty());
    assert_eq!(stats.lives_saved, 0);
    assert_eq!(stats.availability_rate, 0);
}

#[test]
fn dashboard_groups_blood_types_by_descending_count() {
    let service = build_service();
    register_all(
        &service,
        vec![
            registration("Amara Okafor", BloodType::OPositive, "Ames"),
            registration("Tomas Vidal", BloodType::APositive, "Ankeny"),
            registration("Priya Raman", BloodType::OPositive, "Urbandale"),
            registration("Desmond Ames", BloodType::BNegative, "Iowa City"),
            registration("Lena Park", BloodType::OPositive, "Ames"),
        ],
    );

    let stats = service.dashboard().expect("dashboard");
    let grouped: Vec<(BloodType, usize)> = stats
        .donors_by_blood_type
        .iter()
        .map(|entry| (entry.blood_type, entry.count))
        .collect();
    assert_eq!(
        grouped,
        vec![
            (BloodType::OPositive, 3),
            (BloodType::APositive, 1),
            (BloodType::BNegative, 1),
        ]
    );
    assert_eq!(stats.total_donors, 5);
    assert_eq!(stats.available_donors, 5);
    assert_eq!(stats.availability_rate, 100);
}

#[test]
fn dashboard_counts_donations_and_recent_open_requests() {
    let service = build_service();
    let donor = service
        .register_donor(registration("Amara Okafor", BloodType::OPositive, "Ames"))
        .expect("registers");
    for day in 1..=4 {
        service
            .record_donation(&donor.id, donation_on(2025, 3, day))
            .expect("recorded");
    }

    let mut posted = Vec::new();
    for index in 0..7 {
        let request = service
            .post_request(blood_request(&format!("Patient {index}"), Urgency::Urgent))
            .expect("posted");
        posted.push(request);
    }
    service
        .update_request_status(&posted[6].id, RequestStatus::Cancelled)
        .expect("cancelled");

    let stats = service.dashboard().expect("dashboard");
    assert_eq!(stats.total_donations, 4);
    assert_eq!(stats.lives_saved, 12);
    assert_eq!(stats.active_requests, 6);

    let recent: Vec<&str> = stats
        .recent_requests
        .iter()
        .map(|request| request.patient_name.as_str())
        .collect();
    assert_eq!(
        recent,
        vec!["Patient 5", "Patient 4", "Patient 3", "Patient 2", "Patient 1"]
    );
}
