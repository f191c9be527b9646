use skycast_core::{AppError, LocationError, NetworkError, WeatherError};
use skycast_weather::{LocationError as GeoError, WeatherError as GatewayError};

pub fn map_weather_error(e: GatewayError) -> AppError {
    match e {
        GatewayError::MissingCredential => AppError::Weather(WeatherError::MissingCredential),
        GatewayError::NotFound(s) => AppError::Weather(WeatherError::LocationNotFound(s)),
        GatewayError::Unauthorized => AppError::Weather(WeatherError::InvalidApiKey),
        GatewayError::Http { status, message } => {
            AppError::Network(NetworkError::ServerError { status, message })
        }
        GatewayError::Transport(e) if e.is_timeout() => AppError::Network(NetworkError::Timeout),
        GatewayError::Transport(e) => {
            AppError::Network(NetworkError::ConnectionFailed(e.to_string()))
        }
        GatewayError::MalformedResponse(s) => {
            AppError::Weather(WeatherError::MalformedResponse(s))
        }
        GatewayError::Location(e) => map_location_error(e),
        GatewayError::Superseded => AppError::Other(anyhow::anyhow!("query superseded")),
    }
}

pub fn map_location_error(e: GeoError) -> AppError {
    match e {
        GeoError::PermissionDenied => AppError::Location(LocationError::Denied),
        GeoError::ServiceUnavailable => AppError::Location(LocationError::Unavailable),
        GeoError::Timeout => AppError::Location(LocationError::Timeout),
    }
}
