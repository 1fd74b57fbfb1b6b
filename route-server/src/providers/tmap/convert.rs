//! Conversion from TMAP responses to provider-neutral itineraries.

use crate::domain::{Itinerary, ItineraryLeg, TransitMode};

use super::types::{TmapItinerary, TmapLeg, TransitRouteResponse};

/// Extract the itineraries from a response.
///
/// A "no route" result block yields an empty list.
pub fn convert_response(response: TransitRouteResponse) -> Vec<Itinerary> {
    match response.meta_data {
        Some(meta) => meta.plan.itineraries.iter().map(convert_itinerary).collect(),
        None => Vec::new(),
    }
}

pub fn convert_itinerary(itinerary: &TmapItinerary) -> Itinerary {
    Itinerary {
        total_time_sec: itinerary.total_time,
        total_fare_krw: itinerary
            .fare
            .as_ref()
            .and_then(|f| f.regular.as_ref())
            .map(|r| r.total_fare),
        transfer_count: itinerary.transfer_count,
        path_type: itinerary.path_type,
        legs: itinerary.legs.iter().map(convert_leg).collect(),
    }
}

fn convert_leg(leg: &TmapLeg) -> ItineraryLeg {
    // The pass-stop list includes the boarding stop
    let stop_count = leg
        .pass_stop_list
        .as_ref()
        .map(|p| p.station_list.len().saturating_sub(1) as u32);

    ItineraryLeg {
        mode: TransitMode::parse(&leg.mode),
        from_name: leg.start.name.clone(),
        from_x: leg.start.lon,
        from_y: leg.start.lat,
        to_name: leg.end.name.clone(),
        to_x: leg.end.lon,
        to_y: leg.end.lat,
        section_time_sec: leg.section_time,
        distance_m: leg.distance,
        route: leg.route.clone(),
        route_id: leg.route_id.clone(),
        route_color: leg.route_color.clone(),
        stop_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> TransitRouteResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn converts_legs_and_fare() {
        let response = parse(
            r#"{"metaData": {"plan": {"itineraries": [{
                "totalTime": 2400, "transferCount": 1, "pathType": 3,
                "fare": {"regular": {"totalFare": 1500}},
                "legs": [
                    {"mode": "WALK", "sectionTime": 240, "distance": 280,
                     "start": {"name": "출발지", "lon": 127.0, "lat": 37.5},
                     "end": {"name": "강남역", "lon": 127.027, "lat": 37.498}},
                    {"mode": "BUS", "sectionTime": 900, "distance": 4000, "route": "간선:146",
                     "start": {"name": "강남역", "lon": 127.027, "lat": 37.498},
                     "end": {"name": "역삼역", "lon": 127.036, "lat": 37.500},
                     "passStopList": {"stationList": [{}, {}, {}, {}]}},
                    {"mode": "EXPRESSBUS", "sectionTime": 1260, "distance": 20000,
                     "start": {"name": "역삼역", "lon": 127.036, "lat": 37.500},
                     "end": {"name": "도착지", "lon": 127.1, "lat": 37.6}}
                ]
            }]}}}"#,
        );

        let itineraries = convert_response(response);
        assert_eq!(itineraries.len(), 1);

        let it = &itineraries[0];
        assert_eq!(it.total_time_sec, 2400);
        assert_eq!(it.total_fare_krw, Some(1500));
        assert_eq!(it.path_type, 3);
        assert_eq!(it.walk_distance_m(), Some(280));

        assert_eq!(it.legs[0].mode, TransitMode::Walk);
        assert_eq!(it.legs[1].mode, TransitMode::Bus);
        assert_eq!(it.legs[1].stop_count, Some(3));
        assert_eq!(it.legs[1].from_x, 127.027);
        assert_eq!(it.legs[2].mode, TransitMode::Other);
        assert_eq!(it.legs[2].stop_count, None);
    }

    #[test]
    fn missing_fare_is_none() {
        let response = parse(
            r#"{"metaData": {"plan": {"itineraries": [{"totalTime": 600, "legs": []}]}}}"#,
        );

        let itineraries = convert_response(response);
        assert_eq!(itineraries[0].total_fare_krw, None);
    }

    #[test]
    fn no_route_is_empty() {
        let response = parse(r#"{"result": {"status": 11}}"#);
        assert!(convert_response(response).is_empty());
    }
}
